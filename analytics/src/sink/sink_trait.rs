// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::Debug;

use beacon_analytics_schema::{ErrorEvent, KeyedEvent, TrackingEvent};

/// The contract every analytics backend implements so that the
/// [`crate::Dispatcher`] can fan out without knowing anything about the backend.
///
/// # Error policy
///
/// A sink reports a backend failure by returning `Err`. The dispatcher logs it and moves
/// on to the next sink, so one misbehaving backend never prevents the others from
/// receiving the event. Panics are contained the same way. A sink should never retry or
/// block on network I/O inside these calls; detach a task instead (see
/// [`crate::HttpSink`]).
///
/// # Lifecycle
///
/// 1. Constructed at process start and handed to [`crate::DispatcherBuilder::add_sink`].
/// 2. [`Sink::start`] is called once when the dispatcher is built with tracking enabled,
///    or later when tracking is switched back on. It must tolerate being called again.
///    A sink that can't start (eg: missing key) stays inert and turns every other call
///    into a no-op.
/// 3. [`Sink::set_enabled`] is called on opt-out.
///
/// Sinks never hold a reference back to the dispatcher.
pub trait Sink: Send + Sync + Debug {
    /// Short name used in log messages.
    fn name(&self) -> &str;

    /// # Errors
    ///
    /// Returns an error if the backend can't be activated. The sink must stay inert.
    fn start(&self) -> miette::Result<()>;

    /// Unmapped or unsupported fields are silently dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejected the event.
    fn track_event(&self, event: &TrackingEvent) -> miette::Result<()>;

    /// Reserved keys (see [`beacon_analytics_schema::reserved_keys`]) identify a user or
    /// a screen. Everything else is a custom dimension, which may be ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejected the keys.
    fn track_keys(&self, _keys: &KeyedEvent) -> miette::Result<()> { Ok(()) }

    /// # Errors
    ///
    /// Returns an error if the backend rejected the error report.
    fn track_error(&self, _error: &ErrorEvent) -> miette::Result<()> { Ok(()) }

    /// Toggle the backend's own collection flag, if it has one. Backends that don't
    /// support this read the persisted flag the next time they start.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend could not be toggled.
    fn set_enabled(&self, _enabled: bool) -> miette::Result<()> { Ok(()) }
}

/// Type alias for a boxed sink, as stored by the dispatcher.
pub type BoxedSink = Box<dyn Sink>;
