// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach files.
pub mod opt_out_presenter;
pub mod ui_str;

// Re-export.
pub use opt_out_presenter::*;
pub use ui_str::*;
