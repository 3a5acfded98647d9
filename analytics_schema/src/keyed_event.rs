// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::BTreeMap, fmt::Write as _};

use serde::{Deserialize, Serialize};

use crate::{KeyValue, reserved_keys};

/// A bundle of named custom values: user identity, screen name and class, or arbitrary
/// dimensions. Keys are unique and the last write wins. An empty bundle is legal, sinks
/// that need at least one key simply ignore it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyedEvent {
    pub custom_keys: BTreeMap<String, KeyValue>,
}

/// The user identity parts of a [`KeyedEvent`]. Sinks hand these to a dedicated
/// "identify" call instead of forwarding them as dimensions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

/// The screen view parts of a [`KeyedEvent`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenView {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

impl KeyedEvent {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Screen view. The class name is optional.
    #[must_use]
    pub fn screen(name: impl Into<String>, maybe_class_name: Option<&str>) -> Self {
        let name: String = name.into();
        let mut it = Self::new().with_key(reserved_keys::SCREEN_NAME, name);
        if let Some(class_name) = maybe_class_name {
            it.insert(reserved_keys::SCREEN_CLASS, class_name);
        }
        it
    }

    /// User identity. Only the parts that are given end up in the bundle.
    #[must_use]
    pub fn user(
        maybe_user_name: Option<&str>,
        maybe_email: Option<&str>,
        maybe_identifier: Option<&str>,
    ) -> Self {
        let mut it = Self::new();

        #[rustfmt::skip]
        let parts = [
            (reserved_keys::IDENTIFIER, maybe_identifier),
            (reserved_keys::EMAIL,      maybe_email),
            (reserved_keys::USER_NAME,  maybe_user_name),
        ];

        for (key, maybe_value) in parts {
            if let Some(value) = maybe_value {
                it.insert(key, value);
            }
        }

        it
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>, value: impl Into<KeyValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<KeyValue>) {
        self.custom_keys.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&KeyValue> { self.custom_keys.get(key) }

    /// Only returns string values.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.custom_keys.get(key).and_then(KeyValue::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.custom_keys.is_empty() }

    #[must_use]
    pub fn len(&self) -> usize { self.custom_keys.len() }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &KeyValue)> {
        self.custom_keys.iter()
    }

    /// Keys that are not user or screen related, ie: custom dimensions.
    pub fn custom_dimensions(&self) -> impl Iterator<Item = (&String, &KeyValue)> {
        self.iter().filter(|(key, _)| !reserved_keys::is_reserved(key))
    }

    /// `None` unless at least one of the identity keys holds a string.
    #[must_use]
    pub fn user_identity(&self) -> Option<UserIdentity> {
        let it = UserIdentity {
            identifier: self.get_str(reserved_keys::IDENTIFIER).map(str::to_string),
            email: self.get_str(reserved_keys::EMAIL).map(str::to_string),
            user_name: self.get_str(reserved_keys::USER_NAME).map(str::to_string),
        };
        (it != UserIdentity::default()).then_some(it)
    }

    /// `None` without a screen name. A class name on its own is ignored.
    #[must_use]
    pub fn screen_view(&self) -> Option<ScreenView> {
        let name = self.get_str(reserved_keys::SCREEN_NAME)?;
        Some(ScreenView {
            name: name.to_string(),
            class_name: self.get_str(reserved_keys::SCREEN_CLASS).map(str::to_string),
        })
    }

    /// Key / value dump shown in the debug notification, one pair per line.
    #[must_use]
    pub fn debug_info(&self) -> String {
        let mut acc = String::new();
        for (key, value) in &self.custom_keys {
            let _ = match value {
                KeyValue::String(text) => writeln!(acc, "{key} {text}"),
                other => writeln!(acc, "{key} {other}"),
            };
        }
        acc
    }
}

impl<'a> IntoIterator for &'a KeyedEvent {
    type Item = (&'a String, &'a KeyValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, KeyValue>;

    fn into_iter(self) -> Self::IntoIter { self.custom_keys.iter() }
}
