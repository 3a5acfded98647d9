// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Rejections raised while constructing an event. These are raised at construction
/// time, never at dispatch time.
#[derive(thiserror::Error, Debug, miette::Diagnostic, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("📛 Tracking event name can't be empty")]
    #[diagnostic(
        code(beacon_analytics_schema::empty_event_name),
        help("Use one of the `WellKnownEvent` names, or any non blank string")
    )]
    EmptyEventName,
}
