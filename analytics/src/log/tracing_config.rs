// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use tracing_core::LevelFilter;

pub const DEFAULT_LOG_FILE_PATH_AND_PREFIX: &str = "beacon_analytics.log";

/// Configure the tracing logging to suit your needs. You can display the logs to a:
/// 1. file,
/// 2. stdout or stderr,
/// 3. both.
///
/// This configuration also allows you to set the log level.
///
/// You can use [`crate::log::init`] to initialize the tracing system with this
/// configuration.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub writer_config: WriterConfig,
    pub level_filter: LevelFilter,
}

/// - `String` is the file path and prefix to use for the log file. Eg:
///   `/tmp/beacon_analytics.log` or `beacon_analytics.log`.
/// - [`DisplayPreference`] is the preferred display to use for logging.
#[derive(Debug, Clone, PartialEq)]
pub enum WriterConfig {
    None,
    Display(DisplayPreference),
    File(String /* tracing_log_file_path_and_prefix */),
    DisplayAndFile(
        DisplayPreference,
        String, /* tracing_log_file_path_and_prefix */
    ),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPreference {
    Stdout,
    Stderr,
}

impl TracingConfig {
    #[must_use]
    pub fn new_display(preferred_display: DisplayPreference) -> Self {
        Self {
            writer_config: WriterConfig::Display(preferred_display),
            level_filter: LevelFilter::DEBUG,
        }
    }

    #[must_use]
    pub fn new_file(maybe_file_path: Option<String>) -> Self {
        Self {
            writer_config: WriterConfig::File(
                maybe_file_path
                    .unwrap_or_else(|| DEFAULT_LOG_FILE_PATH_AND_PREFIX.to_string()),
            ),
            level_filter: LevelFilter::DEBUG,
        }
    }

    #[must_use]
    pub fn new_file_and_display(
        maybe_file_path: Option<String>,
        preferred_display: DisplayPreference,
    ) -> Self {
        Self {
            writer_config: WriterConfig::DisplayAndFile(
                preferred_display,
                maybe_file_path
                    .unwrap_or_else(|| DEFAULT_LOG_FILE_PATH_AND_PREFIX.to_string()),
            ),
            level_filter: LevelFilter::DEBUG,
        }
    }

    #[must_use]
    pub fn with_level_filter(mut self, level_filter: LevelFilter) -> Self {
        self.level_filter = level_filter;
        self
    }

    #[must_use]
    pub fn maybe_display_preference(&self) -> Option<DisplayPreference> {
        match &self.writer_config {
            WriterConfig::Display(it) | WriterConfig::DisplayAndFile(it, _) => Some(*it),
            WriterConfig::File(_) | WriterConfig::None => None,
        }
    }

    #[must_use]
    pub fn maybe_file_path(&self) -> Option<&str> {
        match &self.writer_config {
            WriterConfig::File(it) | WriterConfig::DisplayAndFile(_, it) => Some(it),
            WriterConfig::Display(_) | WriterConfig::None => None,
        }
    }
}
