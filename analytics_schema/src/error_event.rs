// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{KeyValue, reserved_keys};

/// An error or exception to be recorded by the sinks that support it. `domain` groups
/// related errors (eg: `"network"`, `"io"`), `code` is an optional numeric code within
/// that domain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEvent {
    pub message: String,
    pub domain: String,
    pub code: Option<i64>,
    #[serde(default)]
    pub user_info: BTreeMap<String, KeyValue>,
}

impl ErrorEvent {
    /// The message is also stored in [`Self::user_info`] under
    /// [`reserved_keys::LOCALIZED_DESCRIPTION`], which is where log forwarding sinks look
    /// for it.
    #[must_use]
    pub fn new(message: impl Into<String>, domain: impl Into<String>) -> Self {
        let message = message.into();
        let mut user_info = BTreeMap::new();
        user_info.insert(
            reserved_keys::LOCALIZED_DESCRIPTION.to_string(),
            KeyValue::from(message.as_str()),
        );
        Self {
            message,
            domain: domain.into(),
            code: None,
            user_info,
        }
    }

    /// Capture any [`std::error::Error`] using its [`std::fmt::Display`] output.
    #[must_use]
    pub fn from_error(error: &dyn std::error::Error, domain: impl Into<String>) -> Self {
        Self::new(error.to_string(), domain)
    }

    #[must_use]
    pub fn with_code(mut self, code: i64) -> Self {
        self.code = Some(code);
        self
    }

    #[must_use]
    pub fn with_user_info(
        mut self,
        key: impl Into<String>,
        value: impl Into<KeyValue>,
    ) -> Self {
        self.user_info.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn localized_description(&self) -> Option<&str> {
        self.user_info
            .get(reserved_keys::LOCALIZED_DESCRIPTION)
            .and_then(KeyValue::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let event = ErrorEvent::from_error(&io_error, "io").with_code(2);

        assert_eq!(event.message, "no such file");
        assert_eq!(event.domain, "io");
        assert_eq!(event.code, Some(2));
        assert_eq!(event.localized_description(), Some("no such file"));
    }
}
