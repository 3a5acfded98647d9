// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach files.
pub mod debug_broadcast;
pub mod debug_notifier;

// Re-export.
pub use debug_broadcast::*;
pub use debug_notifier::*;
