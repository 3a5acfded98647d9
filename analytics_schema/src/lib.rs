// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # Introduction
//!
//! This crate is a shared dependency of the beacon analytics crates. It describes the
//! data structures that flow from application code into the dispatcher, and from the
//! dispatcher out to every registered sink.
//!
//! 1. [`TrackingEvent`] is one discrete application event. Its name is validated once,
//!    at construction time, and can't be changed afterwards.
//! 2. [`KeyedEvent`] is a bundle of named custom values. It is used for user identity,
//!    screen tracking and ad-hoc dimensions. The [`reserved_keys`] are interpreted
//!    specially by sinks, all other keys pass through as custom properties.
//! 3. [`ErrorEvent`] is what `trackError` carries to each sink.
//! 4. [`DebugPayload`] is what the dispatcher publishes on the debug broadcast channel
//!    so that external tooling can observe live events.
//!
//! None of these types perform any I/O. They are constructed by the caller right before
//! dispatch, consumed synchronously, and then dropped.

#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach.
pub mod debug_payload;
pub mod error_event;
pub mod event_error;
pub mod keyed_event;
pub mod reserved_keys;
pub mod tracking_event;
pub mod well_known;

// Re-export.
pub use debug_payload::*;
pub use error_event::*;
pub use event_error::*;
pub use keyed_event::*;
pub use tracking_event::*;
pub use well_known::*;

/// Opaque value attached to an event: string, bool, number or object.
pub type KeyValue = serde_json::Value;
