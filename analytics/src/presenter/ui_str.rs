// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use strum_macros::{Display, EnumString};

/// Languages the opt-out confirmation is translated into. Anything else falls back to
/// [`Locale::English`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString)]
pub enum Locale {
    #[default]
    #[strum(serialize = "en")]
    English,
    #[strum(serialize = "de")]
    German,
}

impl Locale {
    /// Parse a BCP 47 style tag, eg: `"de-DE"`, `"de_AT.UTF-8"` or `"en"`. Only the
    /// primary language subtag is looked at.
    #[must_use]
    pub fn from_lang_tag(tag: &str) -> Self {
        let primary = tag
            .split(['-', '_', '.'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        primary.parse().unwrap_or_default()
    }
}

pub mod opt_out_msg {
    use super::Locale;

    #[must_use]
    pub fn alert_message(locale: Locale) -> &'static str {
        match locale {
            Locale::English => {
                "Tracking has been turned off. No further usage data will be sent, \
                 now or after the app restarts."
            }
            Locale::German => {
                "Das Tracking wurde ausgeschaltet. Es werden keine Nutzungsdaten mehr \
                 gesendet, auch nicht nach einem Neustart der App."
            }
        }
    }

    #[must_use]
    pub fn alert_button_title(locale: Locale) -> &'static str {
        match locale {
            Locale::English | Locale::German => "OK",
        }
    }
}
