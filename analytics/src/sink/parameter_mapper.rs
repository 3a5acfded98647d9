// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::BTreeMap, fmt::Debug};

use beacon_analytics_schema::TrackingEvent;

/// Maps a [`TrackingEvent`] onto the flat string map a particular backend expects, and
/// drops every field that is absent. Implement this when a sink needs different key
/// names than the defaults.
pub trait ParameterMapper: Send + Sync + Debug {
    fn map(&self, event: &TrackingEvent) -> BTreeMap<String, String>;
}

/// Category / action / label triple, the vocabulary of classic page view analytics.
/// - `category` = event name
/// - `action` = name
/// - `label` = item id
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultParameterMapper;

impl ParameterMapper for DefaultParameterMapper {
    fn map(&self, event: &TrackingEvent) -> BTreeMap<String, String> {
        let mut acc = BTreeMap::new();
        acc.insert("category".to_string(), event.event_name().to_string());
        if let Some(item_id) = &event.item_id {
            acc.insert("label".to_string(), item_id.clone());
        }
        if let Some(name) = &event.name {
            acc.insert("action".to_string(), name.clone());
        }
        acc
    }
}

/// Every field under its own name. String custom parameters are appended as is, other
/// values are rendered as JSON.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlatParameterMapper;

impl ParameterMapper for FlatParameterMapper {
    fn map(&self, event: &TrackingEvent) -> BTreeMap<String, String> {
        let mut acc = BTreeMap::new();
        acc.insert("event_name".to_string(), event.event_name().to_string());

        #[rustfmt::skip]
        let fields = [
            ("name",        &event.name),
            ("category",    &event.category),
            ("contentType", &event.content_type),
            ("itemId",      &event.item_id),
            ("description", &event.description),
        ];

        for (key, maybe_value) in fields {
            if let Some(value) = maybe_value {
                acc.insert(key.to_string(), value.clone());
            }
        }

        for (key, value) in &event.custom_parameters {
            let value = match value.as_str() {
                Some(text) => text.to_string(),
                None => value.to_string(),
            };
            acc.entry(key.clone()).or_insert(value);
        }

        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> TrackingEvent {
        TrackingEvent::try_new("purchase")
            .unwrap()
            .with_item_id("42")
            .with_name("book")
            .with_custom_parameter("price", 10)
            .with_custom_parameter("currency", "EUR")
    }

    #[test]
    fn test_default_mapper() {
        let map = DefaultParameterMapper.map(&sample());
        let expected: BTreeMap<String, String> = [
            ("action", "book"),
            ("category", "purchase"),
            ("label", "42"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert_eq!(map, expected);
    }

    #[test]
    fn test_flat_mapper_drops_absent_fields() {
        let map = FlatParameterMapper.map(&sample());
        assert_eq!(map.get("event_name").map(String::as_str), Some("purchase"));
        assert_eq!(map.get("itemId").map(String::as_str), Some("42"));
        assert_eq!(map.get("price").map(String::as_str), Some("10"));
        assert_eq!(map.get("currency").map(String::as_str), Some("EUR"));
        assert_eq!(map.get("category"), None);
        assert_eq!(map.get("description"), None);
    }

    #[test]
    fn test_flat_mapper_custom_parameter_cant_shadow_field() {
        let event = TrackingEvent::try_new("share")
            .unwrap()
            .with_name("real")
            .with_custom_parameter("name", "shadow");
        let map = FlatParameterMapper.map(&event);
        assert_eq!(map.get("name").map(String::as_str), Some("real"));
    }
}
