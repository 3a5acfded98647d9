// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::Debug;

use super::{Locale, opt_out_msg};

/// What the user is told when they switch tracking off.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptOutMessage {
    pub message: String,
    pub button_title: String,
}

impl OptOutMessage {
    #[must_use]
    pub fn localized(locale: Locale) -> Self {
        Self {
            message: opt_out_msg::alert_message(locale).to_string(),
            button_title: opt_out_msg::alert_button_title(locale).to_string(),
        }
    }
}

impl Default for OptOutMessage {
    fn default() -> Self { Self::localized(Locale::default()) }
}

/// Presents the opt-out confirmation with a single acknowledgement action.
///
/// This must not block the caller waiting for the user. The dispatcher carries on
/// with the opt-out as soon as this returns.
pub trait OptOutPresenter: Send + Sync + Debug {
    fn confirm_opt_out(&self, message: &OptOutMessage);
}

/// Headless presenter that writes the confirmation to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingOptOutPresenter;

impl OptOutPresenter for TracingOptOutPresenter {
    fn confirm_opt_out(&self, message: &OptOutMessage) {
        // % is Display, ? is Debug.
        tracing::info!(
            message = "🔕 Tracking opt-out",
            alert = %message.message,
            button = %message.button_title
        );
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_localized_message() {
        let it = OptOutMessage::localized(Locale::German);
        assert_eq!(it.message, opt_out_msg::alert_message(Locale::German));
        assert_eq!(it.button_title, "OK");
        assert_eq!(OptOutMessage::default(), OptOutMessage::localized(Locale::English));
    }
}
