// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Value that project templates ship with, before anyone pastes a real key in.
pub const PLACEHOLDER_KEY: &str = "your-key-here";

/// Attributes shared by every sink: an opaque configuration key (may be absent), a
/// logging flag, a debug mode flag, and whether exceptions are forwarded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    pub key: Option<String>,
    pub logging_enabled: bool,
    pub debug_mode: bool,
    pub exception_tracking_enabled: bool,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            key: None,
            logging_enabled: false,
            debug_mode: cfg!(debug_assertions),
            exception_tracking_enabled: true,
        }
    }
}

impl SinkConfig {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    #[must_use]
    pub fn logging(mut self, enabled: bool) -> Self {
        self.logging_enabled = enabled;
        self
    }

    #[must_use]
    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug_mode = enabled;
        self
    }

    #[must_use]
    pub fn exception_tracking(mut self, enabled: bool) -> Self {
        self.exception_tracking_enabled = enabled;
        self
    }

    /// # Errors
    ///
    /// Returns [`SinkConfigError::MissingKey`] if the key is absent, empty, or still set
    /// to [`PLACEHOLDER_KEY`].
    pub fn check_key(&self, sink_name: &str) -> Result<&str, SinkConfigError> {
        match self.key.as_deref() {
            Some(key) if !key.trim().is_empty() && key != PLACEHOLDER_KEY => Ok(key),
            _ => Err(SinkConfigError::MissingKey {
                sink_name: sink_name.to_string(),
            }),
        }
    }
}

#[derive(thiserror::Error, Debug, miette::Diagnostic, Clone, PartialEq, Eq)]
pub enum SinkConfigError {
    #[error("🔑 No key defined for sink: '{sink_name}'")]
    #[diagnostic(
        code(beacon_analytics::sink::missing_key),
        help("Pass a real key to `SinkConfig::with_key`, the sink stays inert until then")
    )]
    MissingKey { sink_name: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(None; "absent")]
    #[test_case(Some(""); "empty")]
    #[test_case(Some("  "); "blank")]
    #[test_case(Some(PLACEHOLDER_KEY); "placeholder")]
    fn test_check_key_rejects(maybe_key: Option<&str>) {
        let mut config = SinkConfig::new();
        config.key = maybe_key.map(ToString::to_string);
        assert_eq!(
            config.check_key("http"),
            Err(SinkConfigError::MissingKey {
                sink_name: "http".to_string()
            })
        );
    }

    #[test]
    fn test_check_key_accepts_real_key() {
        let config = SinkConfig::new().with_key("abc123");
        assert_eq!(config.check_key("http"), Ok("abc123"));
    }

    #[test]
    fn test_fluent_flags() {
        let config = SinkConfig::new()
            .logging(true)
            .debug(false)
            .exception_tracking(false);
        assert!(config.logging_enabled);
        assert!(!config.debug_mode);
        assert!(!config.exception_tracking_enabled);
    }
}
