// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach files.
pub mod http_sink;
pub mod parameter_mapper;
pub mod sink_config;
pub mod sink_trait;
pub mod tracing_sink;

// Re-export.
pub use http_sink::*;
pub use parameter_mapper::*;
pub use sink_config::*;
pub use sink_trait::*;
pub use tracing_sink::*;
