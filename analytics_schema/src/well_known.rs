// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use strum_macros::{AsRefStr, Display, EnumString};

/// Event names that sinks know how to map onto their own vocabulary. Any other string is
/// still a valid [`crate::TrackingEvent`] name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum WellKnownEvent {
    ViewItem,
    #[strum(serialize = "ecommerce_purchase")]
    Purchase,
    Login,
    SelectContent,
    ViewItemList,
    ViewSearchResults,
    Share,
    Message,
    Debug,
    IdentifyUser,
}

/// Synthetic events emitted by the dispatcher itself to record tracking consent changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
pub enum MarkerEvent {
    #[strum(serialize = "tracking_opt_in")]
    OptIn,
    #[strum(serialize = "tracking_opt_out")]
    OptOut,
}

impl MarkerEvent {
    #[must_use]
    pub fn for_enabled(enabled: bool) -> Self {
        if enabled { MarkerEvent::OptIn } else { MarkerEvent::OptOut }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use test_case::test_case;

    #[test_case(WellKnownEvent::ViewItem, "view_item")]
    #[test_case(WellKnownEvent::Purchase, "ecommerce_purchase")]
    #[test_case(WellKnownEvent::SelectContent, "select_content")]
    #[test_case(WellKnownEvent::ViewSearchResults, "view_search_results")]
    #[test_case(WellKnownEvent::IdentifyUser, "identify_user")]
    fn test_well_known_names(event: WellKnownEvent, name: &str) {
        assert_eq!(event.as_ref(), name);
        assert_eq!(WellKnownEvent::from_str(name), Ok(event));
    }

    #[test]
    fn test_marker_names() {
        assert_eq!(MarkerEvent::for_enabled(true).to_string(), "tracking_opt_in");
        assert_eq!(MarkerEvent::for_enabled(false).to_string(), "tracking_opt_out");
    }
}
