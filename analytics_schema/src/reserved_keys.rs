// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Key names that have a fixed meaning.
//!
//! The first group is used inside [`crate::KeyedEvent`] and is interpreted specially by
//! sinks (user identity and screen tracking). The second group names the entries of the
//! [`crate::DebugPayload`] published on the debug broadcast channel.

pub const LOCALIZED_DESCRIPTION: &str = "localizedDescription";
pub const IDENTIFIER: &str = "id";
pub const EMAIL: &str = "email";
pub const USER_NAME: &str = "userName";
pub const SCREEN_NAME: &str = "screenName";
pub const SCREEN_CLASS: &str = "screenClass";

// Debug payload.
pub const EVENT_NAME: &str = "eventName";
pub const ITEM_ID: &str = "itemId";
pub const CONTENT_TYPE: &str = "contentType";
pub const CATEGORY: &str = "category";
pub const CREATED_AT: &str = "createdAt";

/// Returns `true` for the keys that identify a user or a screen, ie: the keys that a
/// sink must not forward as a plain custom dimension.
#[must_use]
pub fn is_reserved(key: &str) -> bool {
    matches!(
        key,
        IDENTIFIER | EMAIL | USER_NAME | SCREEN_NAME | SCREEN_CLASS
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(IDENTIFIER, true)]
    #[test_case(EMAIL, true)]
    #[test_case(USER_NAME, true)]
    #[test_case(SCREEN_NAME, true)]
    #[test_case(SCREEN_CLASS, true)]
    #[test_case("resortId", false)]
    #[test_case(EVENT_NAME, false)]
    fn test_is_reserved(key: &str, expected: bool) {
        assert_eq!(is_reserved(key), expected);
    }
}
