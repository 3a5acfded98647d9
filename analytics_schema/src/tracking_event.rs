// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::BTreeMap, fmt::Write as _};

use serde::{Deserialize, Serialize};

use crate::{EventError, KeyValue, MarkerEvent, WellKnownEvent};

/// One application level occurrence to be recorded by every sink.
///
/// The event name is validated by [`TrackingEvent::try_new`] and can't be modified
/// afterwards (there is no setter for it). All the other fields are optional and are set
/// with the consuming `with_*` methods right after construction.
///
/// ```
/// use beacon_analytics_schema::TrackingEvent;
///
/// let event = TrackingEvent::try_new("purchase")?
///     .with_item_id("42")
///     .with_category("shop");
/// assert_eq!(event.event_name(), "purchase");
/// # Ok::<(), beacon_analytics_schema::EventError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawTrackingEvent")]
pub struct TrackingEvent {
    event_name: String,
    pub item_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub content_type: Option<String>,
    #[serde(default)]
    pub custom_parameters: BTreeMap<String, KeyValue>,
}

/// Wire shape of [`TrackingEvent`]. Deserialization goes through
/// [`TrackingEvent::try_new`] so a blank name is rejected there too.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTrackingEvent {
    event_name: String,
    item_id: Option<String>,
    name: Option<String>,
    description: Option<String>,
    category: Option<String>,
    content_type: Option<String>,
    #[serde(default)]
    custom_parameters: BTreeMap<String, KeyValue>,
}

impl TryFrom<RawTrackingEvent> for TrackingEvent {
    type Error = EventError;

    fn try_from(raw: RawTrackingEvent) -> Result<Self, Self::Error> {
        let mut it = Self::try_new(raw.event_name)?;
        it.item_id = raw.item_id;
        it.name = raw.name;
        it.description = raw.description;
        it.category = raw.category;
        it.content_type = raw.content_type;
        it.custom_parameters = raw.custom_parameters;
        Ok(it)
    }
}

impl TrackingEvent {
    /// # Errors
    ///
    /// Returns [`EventError::EmptyEventName`] if `event_name` is empty or only contains
    /// whitespace.
    pub fn try_new(event_name: impl Into<String>) -> Result<Self, EventError> {
        let event_name = event_name.into();
        if event_name.trim().is_empty() {
            return Err(EventError::EmptyEventName);
        }
        Ok(Self::new_unchecked(event_name))
    }

    /// Well known names are never empty, so this can't fail.
    #[must_use]
    pub fn from_well_known(event: WellKnownEvent) -> Self {
        Self::new_unchecked(event.to_string())
    }

    /// Marker names are never empty, so this can't fail.
    #[must_use]
    pub fn from_marker(marker: MarkerEvent) -> Self {
        Self::new_unchecked(marker.to_string())
    }

    fn new_unchecked(event_name: String) -> Self {
        Self {
            event_name,
            item_id: None,
            name: None,
            description: None,
            category: None,
            content_type: None,
            custom_parameters: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn event_name(&self) -> &str { &self.event_name }

    #[must_use]
    pub fn with_item_id(mut self, item_id: impl Into<String>) -> Self {
        self.item_id = Some(item_id.into());
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Last write wins for a repeated key.
    #[must_use]
    pub fn with_custom_parameter(
        mut self,
        key: impl Into<String>,
        value: impl Into<KeyValue>,
    ) -> Self {
        self.custom_parameters.insert(key.into(), value.into());
        self
    }

    /// Human readable digest shown in the debug notification. Only the fields that are
    /// present are listed.
    #[must_use]
    pub fn debug_info(&self) -> String {
        let mut acc = format!("Event: {}\n", self.event_name);

        #[rustfmt::skip]
        let fields = [
            ("Name",         &self.name),
            ("ItemId",       &self.item_id),
            ("Description",  &self.description),
            ("Category",     &self.category),
            ("Content Type", &self.content_type),
        ];

        for (label, maybe_value) in fields {
            if let Some(value) = maybe_value {
                // Writing to a String can't fail.
                let _ = write!(acc, "{label}: {value} ");
            }
        }

        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(""; "empty")]
    #[test_case("   "; "blank")]
    #[test_case("\n\t"; "whitespace")]
    fn test_empty_event_name_is_rejected(name: &str) {
        assert_eq!(TrackingEvent::try_new(name), Err(EventError::EmptyEventName));
    }

    #[test]
    fn test_optional_fields_are_independent() {
        let event = TrackingEvent::try_new("purchase")
            .unwrap()
            .with_item_id("42")
            .with_content_type("book");

        assert_eq!(event.event_name(), "purchase");
        assert_eq!(event.item_id.as_deref(), Some("42"));
        assert_eq!(event.content_type.as_deref(), Some("book"));
        assert_eq!(event.name, None);
        assert_eq!(event.description, None);
        assert_eq!(event.category, None);
        assert!(event.custom_parameters.is_empty());
    }

    #[test]
    fn test_custom_parameter_last_write_wins() {
        let event = TrackingEvent::try_new("share")
            .unwrap()
            .with_custom_parameter("channel", "mail")
            .with_custom_parameter("channel", "sms")
            .with_custom_parameter("count", 3);

        assert_eq!(event.custom_parameters.len(), 2);
        assert_eq!(event.custom_parameters["channel"], KeyValue::from("sms"));
        assert_eq!(event.custom_parameters["count"], KeyValue::from(3));
    }

    #[test]
    fn test_debug_info_lists_present_fields_in_order() {
        let event = TrackingEvent::try_new("select_content")
            .unwrap()
            .with_category("news")
            .with_name("front page")
            .with_item_id("7");

        assert_eq!(
            event.debug_info(),
            "Event: select_content\nName: front page ItemId: 7 Category: news "
        );
    }

    #[test]
    fn test_debug_info_name_only() {
        let event = TrackingEvent::from_well_known(WellKnownEvent::Login);
        assert_eq!(event.debug_info(), "Event: login\n");
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let event = TrackingEvent::try_new("view_item")
            .unwrap()
            .with_content_type("article");
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["eventName"], "view_item");
        assert_eq!(json["contentType"], "article");
        assert!(json["itemId"].is_null());
    }

    #[test_case(r#"{"eventName":""}"#; "empty")]
    #[test_case(r#"{"eventName":"   "}"#; "blank")]
    #[test_case(r#"{"itemId":"7"}"#; "missing")]
    fn test_deserialize_rejects_invalid_event_name(json: &str) {
        assert!(serde_json::from_str::<TrackingEvent>(json).is_err());
    }

    #[test]
    fn test_deserialize_keeps_optional_fields() {
        let json =
            r#"{"eventName":"share","category":"social","customParameters":{"n":2}}"#;
        let event: TrackingEvent = serde_json::from_str(json).unwrap();

        assert_eq!(
            event,
            TrackingEvent::try_new("share")
                .unwrap()
                .with_category("social")
                .with_custom_parameter("n", 2)
        );
    }
}
