// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! A sink that forwards events into the `tracing` pipeline. Whatever subscriber is
//! installed (see [`crate::log`]) decides where they end up: the terminal, a log file, or
//! a remote collector layer.

use std::{collections::BTreeMap,
          str::FromStr,
          sync::atomic::{AtomicBool, Ordering}};

use beacon_analytics_schema::{ErrorEvent, KeyValue, KeyedEvent, TrackingEvent};

use super::{Sink, SinkConfig};

/// Severity of a tracked event, derived from its content type. Anything that isn't
/// `"warning"` or `"error"` (case insensitive) is [`LogLevel::Info`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::EnumString)]
#[strum(ascii_case_insensitive)]
pub enum LogLevel {
    #[strum(serialize = "info")]
    Info,
    #[strum(serialize = "warning", serialize = "warn")]
    Warning,
    #[strum(serialize = "error")]
    Error,
}

impl LogLevel {
    #[must_use]
    pub fn from_content_type(maybe_content_type: Option<&str>) -> Self {
        maybe_content_type
            .and_then(|it| LogLevel::from_str(it).ok())
            .unwrap_or(LogLevel::Info)
    }
}

/// Logs tracked items with [`tracing`].
///
/// - [`SinkConfig::logging_enabled`] gates events and key bundles. With it off only
///   errors are recorded (and only when exception tracking is on).
/// - [`SinkConfig::debug_mode`] adds a debug record with every field of an event,
///   custom parameters included.
/// - A key bundle is split up: a screen view and a user identity each get their own
///   record, the remaining keys are logged as dimensions.
#[derive(Debug)]
pub struct TracingSink {
    config: SinkConfig,
    active: AtomicBool,
}

impl TracingSink {
    #[must_use]
    pub fn new(config: SinkConfig) -> Self {
        Self {
            config,
            active: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool { self.active.load(Ordering::Acquire) }

    fn is_logging(&self) -> bool { self.is_active() && self.config.logging_enabled }
}

impl Default for TracingSink {
    fn default() -> Self { Self::new(SinkConfig::new().logging(true)) }
}

impl Sink for TracingSink {
    fn name(&self) -> &str { "tracing" }

    fn start(&self) -> miette::Result<()> {
        self.active.store(true, Ordering::Release);
        Ok(())
    }

    fn track_event(&self, event: &TrackingEvent) -> miette::Result<()> {
        if !self.is_logging() {
            return Ok(());
        }

        let level = LogLevel::from_content_type(event.content_type.as_deref());
        let name = event.event_name();
        let message = event.description.as_deref().unwrap_or_default();

        // % is Display, ? is Debug.
        match level {
            LogLevel::Info => tracing::info!(
                message = "📊 Track event",
                event_name = %name,
                item_id = ?event.item_id,
                description = %message
            ),
            LogLevel::Warning => tracing::warn!(
                message = "📊 Track event",
                event_name = %name,
                item_id = ?event.item_id,
                description = %message
            ),
            LogLevel::Error => tracing::error!(
                message = "📊 Track event",
                event_name = %name,
                item_id = ?event.item_id,
                description = %message
            ),
        }

        if self.config.debug_mode {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "🔍 Event details",
                event_name = %name,
                name = ?event.name,
                category = ?event.category,
                content_type = ?event.content_type,
                custom_parameters = ?event.custom_parameters
            );
        }

        Ok(())
    }

    fn track_keys(&self, keys: &KeyedEvent) -> miette::Result<()> {
        if !self.is_logging() || keys.is_empty() {
            return Ok(());
        }

        if let Some(screen) = keys.screen_view() {
            // % is Display, ? is Debug.
            tracing::info!(
                message = "🖥️ Track screen",
                screen_name = %screen.name,
                screen_class = ?screen.class_name
            );
        }

        if let Some(user) = keys.user_identity() {
            // % is Display, ? is Debug.
            tracing::info!(
                message = "👤 Identify user",
                identifier = ?user.identifier,
                email = ?user.email,
                user_name = ?user.user_name
            );
        }

        let dimensions: BTreeMap<&str, &KeyValue> = keys
            .custom_dimensions()
            .map(|(key, value)| (key.as_str(), value))
            .collect();
        if !dimensions.is_empty() {
            // % is Display, ? is Debug.
            tracing::info!(message = "🔑 Track dimensions", dimensions = ?dimensions);
        }

        Ok(())
    }

    fn track_error(&self, error: &ErrorEvent) -> miette::Result<()> {
        if !self.is_active() || !self.config.exception_tracking_enabled {
            return Ok(());
        }

        let description = error.localized_description().unwrap_or(error.message.as_str());

        // % is Display, ? is Debug.
        tracing::error!(
            message = "💥 Track error",
            domain = %error.domain,
            code = ?error.code,
            description = %description
        );

        Ok(())
    }

    fn set_enabled(&self, enabled: bool) -> miette::Result<()> {
        self.active.store(enabled, Ordering::Release);
        Ok(())
    }
}
