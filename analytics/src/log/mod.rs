// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Bootstrap for the [tracing] pipeline that every part of this crate logs into. The
//! [`crate::TracingSink`] also records events here, so installing a subscriber is all it
//! takes to see tracked events in a terminal or a log file.

// Attach files.
pub mod rolling_file_appender_impl;
pub mod tracing_config;
pub mod tracing_init;

// Re-export.
pub use tracing_config::*;
pub use tracing_init::*;
