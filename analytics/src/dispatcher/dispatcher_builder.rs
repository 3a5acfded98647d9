// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{BoxedSink, DEFAULT_TRACKING_ENABLED, DebugBroadcast, DebugNotifier, Dispatcher,
            OptOutMessage, OptOutPresenter, SettingsStore, Sink, TracingOptOutPresenter};

/// Decides whether [`Dispatcher::set_enabled`]`(true)` re-emits the opt-in marker when
/// tracking is already enabled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OptInMarkerPolicy {
    /// Only when tracking actually goes from disabled to enabled.
    #[default]
    OnTransition,
    /// On every call.
    EveryCall,
}

/// Accumulates sinks and debug options, then produces one [`Dispatcher`]. The builder is
/// consumed by [`DispatcherBuilder::build`], so sinks can't be started twice by
/// accident.
///
/// ```no_run
/// use beacon_analytics::{DispatcherBuilder, InMemorySettingsStore, TracingSink};
///
/// let dispatcher = DispatcherBuilder::new(InMemorySettingsStore::new())
///     .add_sink(TracingSink::default())
///     .enable_debug_broadcast(true)
///     .build();
/// assert_eq!(dispatcher.sink_count(), 1);
/// ```
#[derive(Debug)]
pub struct DispatcherBuilder {
    pub(super) settings: Box<dyn SettingsStore>,
    pub(super) default_tracking_enabled: bool,
    pub(super) sinks: Vec<BoxedSink>,
    pub(super) maybe_notifier: Option<Box<dyn DebugNotifier>>,
    pub(super) debug_broadcast_enabled: bool,
    pub(super) maybe_broadcast: Option<DebugBroadcast>,
    pub(super) presenter: Box<dyn OptOutPresenter>,
    pub(super) opt_out_message: OptOutMessage,
    pub(super) opt_in_marker_policy: OptInMarkerPolicy,
}

impl DispatcherBuilder {
    pub fn new(settings: impl SettingsStore + 'static) -> Self {
        Self {
            settings: Box::new(settings),
            default_tracking_enabled: DEFAULT_TRACKING_ENABLED,
            sinks: vec![],
            maybe_notifier: None,
            debug_broadcast_enabled: false,
            maybe_broadcast: None,
            presenter: Box::new(TracingOptOutPresenter),
            opt_out_message: OptOutMessage::default(),
            opt_in_marker_policy: OptInMarkerPolicy::default(),
        }
    }

    /// Appended to the fan-out order. Adding the same kind of sink twice is allowed.
    #[must_use]
    pub fn add_sink(self, sink: impl Sink + 'static) -> Self {
        self.add_boxed_sink(Box::new(sink))
    }

    /// For sinks picked at runtime, eg: from a list of configured backends.
    #[must_use]
    pub fn add_boxed_sink(mut self, sink: BoxedSink) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Show a local notification with a digest of every tracked event and keys bundle.
    #[must_use]
    pub fn enable_debug_notifications(
        mut self,
        notifier: impl DebugNotifier + 'static,
    ) -> Self {
        self.maybe_notifier = Some(Box::new(notifier));
        self
    }

    /// Publish every tracked event on the debug broadcast channel. Uses
    /// [`DebugBroadcast::global`] unless [`DispatcherBuilder::debug_broadcast_channel`]
    /// is also called.
    #[must_use]
    pub fn enable_debug_broadcast(mut self, enabled: bool) -> Self {
        self.debug_broadcast_enabled = enabled;
        self
    }

    #[must_use]
    pub fn debug_broadcast_channel(mut self, broadcast: DebugBroadcast) -> Self {
        self.maybe_broadcast = Some(broadcast);
        self
    }

    #[must_use]
    pub fn opt_out_presenter(mut self, presenter: impl OptOutPresenter + 'static) -> Self {
        self.presenter = Box::new(presenter);
        self
    }

    #[must_use]
    pub fn opt_out_message(mut self, message: OptOutMessage) -> Self {
        self.opt_out_message = message;
        self
    }

    #[must_use]
    pub fn opt_in_marker_policy(mut self, policy: OptInMarkerPolicy) -> Self {
        self.opt_in_marker_policy = policy;
        self
    }

    /// Registered with the settings store on build. Only used until the flag has been
    /// written once.
    #[must_use]
    pub fn default_tracking_enabled(mut self, enabled: bool) -> Self {
        self.default_tracking_enabled = enabled;
        self
    }

    /// Reads the persisted flag. When tracking is enabled this also starts every sink
    /// and emits the opt-in marker.
    #[must_use]
    pub fn build(self) -> Dispatcher { Dispatcher::from_builder(self) }
}
