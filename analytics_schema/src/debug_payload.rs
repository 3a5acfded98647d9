// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{KeyValue, KeyedEvent, TrackingEvent};

/// The public part of an event that is published on the debug broadcast channel, for
/// external QA tooling to observe live events without hooking into individual sinks.
///
/// Only the name, item id, category and content type of a [`TrackingEvent`] are
/// published. Descriptions and custom parameters stay private.
#[rustfmt::skip]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DebugPayload {
    #[serde(rename_all = "camelCase")]
    Event {
        id: Uuid,                     /* unique identifier for this payload */
        event_name: String,
        item_id: Option<String>,
        category: Option<String>,
        content_type: Option<String>,
        created_at: DateTime<Utc>,    /* serialized as ISO-8601 */
    },
    #[serde(rename_all = "camelCase")]
    Keys {
        id: Uuid,
        custom_keys: BTreeMap<String, KeyValue>,
        created_at: DateTime<Utc>,
    },
}

impl From<&TrackingEvent> for DebugPayload {
    fn from(event: &TrackingEvent) -> Self {
        DebugPayload::Event {
            id: Uuid::new_v4(),
            event_name: event.event_name().to_string(),
            item_id: event.item_id.clone(),
            category: event.category.clone(),
            content_type: event.content_type.clone(),
            created_at: Utc::now(),
        }
    }
}

impl From<&KeyedEvent> for DebugPayload {
    fn from(keys: &KeyedEvent) -> Self {
        DebugPayload::Keys {
            id: Uuid::new_v4(),
            custom_keys: keys.custom_keys.clone(),
            created_at: Utc::now(),
        }
    }
}

impl DebugPayload {
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            DebugPayload::Event { created_at, .. }
            | DebugPayload::Keys { created_at, .. } => *created_at,
        }
    }

    /// `None` for a key bundle.
    #[must_use]
    pub fn event_name(&self) -> Option<&str> {
        match self {
            DebugPayload::Event { event_name, .. } => Some(event_name),
            DebugPayload::Keys { .. } => None,
        }
    }

    /// Flatten into the string map that debug tooling consumes. Absent optional fields
    /// are left out. `createdAt` is always present.
    #[must_use]
    pub fn to_string_map(&self) -> BTreeMap<&'static str, String> {
        use crate::reserved_keys::{CATEGORY, CONTENT_TYPE, CREATED_AT, EVENT_NAME, ITEM_ID};

        let mut acc = BTreeMap::new();
        acc.insert(
            CREATED_AT,
            self.created_at().to_rfc3339_opts(SecondsFormat::Millis, true),
        );

        if let DebugPayload::Event {
            event_name,
            item_id,
            category,
            content_type,
            ..
        } = self
        {
            acc.insert(EVENT_NAME, event_name.clone());
            for (key, maybe_value) in
                [(ITEM_ID, item_id), (CATEGORY, category), (CONTENT_TYPE, content_type)]
            {
                if let Some(value) = maybe_value {
                    acc.insert(key, value.clone());
                }
            }
        }

        acc
    }
}
