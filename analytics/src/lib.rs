// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # Introduction
//!
//! An analytics facade. Application code talks to one [`Dispatcher`], which fans every
//! call out to any number of registered [`Sink`]s. Each sink translates the generic
//! [`TrackingEvent`] / [`KeyedEvent`] / [`ErrorEvent`] into whatever its backend
//! understands.
//!
//! A single "tracking enabled" flag gates everything. It is persisted in a
//! [`SettingsStore`] and read once at startup, which is how a user's opt-out survives a
//! restart. Switching tracking off presents a confirmation via an [`OptOutPresenter`],
//! tells every sink to stop collecting, records an opt-out marker event, and then
//! persists the flag.
//!
//! # Debugging the tracking
//!
//! 1. [`DispatcherBuilder::enable_debug_notifications`] shows a desktop notification
//!    with a digest of every tracked event.
//! 2. [`DispatcherBuilder::enable_debug_broadcast`] publishes every event on a process
//!    wide [`DebugBroadcast`] channel that QA tooling can subscribe to.
//! 3. [`TracingSink`] writes events into the [tracing] pipeline, see [`log::init`].
//!
//! # Example
//!
//! ```no_run
//! use beacon_analytics::{DispatcherBuilder, KvSettingsStore, TracingSink,
//!                        TrackingEvent};
//!
//! # fn main() -> miette::Result<()> {
//! let dispatcher = DispatcherBuilder::new(KvSettingsStore::open_default()?)
//!     .add_sink(TracingSink::default())
//!     .build();
//!
//! dispatcher.track_event(&TrackingEvent::try_new("purchase")?.with_item_id("42"));
//! dispatcher.track_screen("settings", Some("SettingsScreen"));
//! dispatcher.set_enabled(false);
//! # Ok(())
//! # }
//! ```

// https://github.com/rust-lang/rust-clippy
// https://rust-lang.github.io/rust-clippy/master/index.html
#![warn(clippy::all)]
#![warn(clippy::unwrap_in_result)]
#![warn(rust_2018_idioms)]
#![warn(clippy::doc_markdown)]
#![warn(clippy::redundant_closure)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(clippy::must_use_candidate)]
#![warn(clippy::items_after_statements)]
#![warn(clippy::needless_return)]
#![warn(clippy::redundant_else)]
#![warn(clippy::match_wildcard_for_single_variants)]
#![warn(clippy::map_unwrap_or)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::manual_let_else)]
#![warn(clippy::if_not_else)]
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach.
pub mod debug;
pub mod dispatcher;
pub mod log;
pub mod presenter;
pub mod settings;
pub mod sink;

#[cfg(test)]
pub mod test_fixtures;

// Re-export.
pub use beacon_analytics_schema::*;
pub use debug::*;
pub use dispatcher::*;
pub use presenter::*;
pub use settings::*;
pub use sink::*;

/// Turns on the chatty debug level logging in this crate.
pub const DEBUG_ANALYTICS_MOD: bool = true;
