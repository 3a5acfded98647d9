// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach files.
pub mod dispatcher_builder;
pub mod dispatcher_impl;

// Re-export.
pub use dispatcher_builder::*;
pub use dispatcher_impl::*;
