// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The analytics facade. One [`Dispatcher`] owns every registered [`Sink`] and the
//! tracking enabled flag, and fans each call out to all sinks.
//!
//! # State machine
//!
//! There are two states, Enabled and Disabled. The initial state is read from the
//! [`SettingsStore`] when the dispatcher is built.
//!
//! | call                      | Disabled                              | Enabled                                      |
//! | ------------------------- | ------------------------------------- | -------------------------------------------- |
//! | `track_*`                 | no-op                                 | fan out, debug notification, debug broadcast |
//! | `set_enabled(false)`      | confirm, persist `false`              | confirm, fan out `set_enabled(false)`, opt-out marker, persist `false` |
//! | `set_enabled(true)`       | fan out `start()`, persist, opt-in marker | persist, opt-in marker per [`OptInMarkerPolicy`] |
//!
//! All calls are serialized by one mutex, so a `track_*` call observes the state either
//! before or after a transition, never half of one.
//!
//! # Failure containment
//!
//! Nothing here returns an error to the caller. A sink that returns `Err` or panics is
//! logged and skipped, and the remaining sinks still get the call. A settings read
//! failure falls back to the registered default, and a settings write failure is
//! logged.

use std::{panic::AssertUnwindSafe,
          sync::{Mutex, MutexGuard, PoisonError}};

use beacon_analytics_schema::{DebugPayload, ErrorEvent, KeyedEvent, MarkerEvent,
                              TrackingEvent, WellKnownEvent};

use crate::{BoxedSink, DEBUG_ANALYTICS_MOD, DEBUG_NOTIFICATION_TITLE, DebugBroadcast,
            DebugNotifier, DispatcherBuilder, OptInMarkerPolicy, OptOutMessage,
            OptOutPresenter, SettingsStore, Sink};

#[derive(Debug)]
struct DispatcherState {
    enabled: bool,
    sinks: Vec<BoxedSink>,
}

#[derive(Debug)]
pub struct Dispatcher {
    state: Mutex<DispatcherState>,
    settings: Box<dyn SettingsStore>,
    maybe_notifier: Option<Box<dyn DebugNotifier>>,
    maybe_broadcast: Option<DebugBroadcast>,
    presenter: Box<dyn OptOutPresenter>,
    opt_out_message: OptOutMessage,
    opt_in_marker_policy: OptInMarkerPolicy,
}

impl Dispatcher {
    pub(super) fn from_builder(builder: DispatcherBuilder) -> Self {
        let DispatcherBuilder {
            settings,
            default_tracking_enabled,
            sinks,
            maybe_notifier,
            debug_broadcast_enabled,
            maybe_broadcast,
            presenter,
            opt_out_message,
            opt_in_marker_policy,
        } = builder;

        settings.register_default(default_tracking_enabled);
        let enabled = read_tracking_enabled(settings.as_ref(), default_tracking_enabled);

        let maybe_broadcast = debug_broadcast_enabled
            .then(|| maybe_broadcast.unwrap_or_else(|| DebugBroadcast::global().clone()));

        let it = Self {
            state: Mutex::new(DispatcherState { enabled, sinks }),
            settings,
            maybe_notifier,
            maybe_broadcast,
            presenter,
            opt_out_message,
            opt_in_marker_policy,
        };

        {
            let state = it.lock();

            // % is Display, ? is Debug.
            tracing::info!(
                message = "📊 Analytics dispatcher built",
                enabled = enabled,
                sink_count = state.sinks.len(),
                debug_notifications = it.maybe_notifier.is_some(),
                debug_broadcast = it.maybe_broadcast.is_some()
            );

            if enabled {
                fan_out(&state.sinks, "start", |sink| sink.start());
                let opt_in = TrackingEvent::from_marker(MarkerEvent::for_enabled(enabled));
                it.dispatch_event(&state, &opt_in);
            }
        }

        it
    }

    #[must_use]
    pub fn builder(settings: impl SettingsStore + 'static) -> DispatcherBuilder {
        DispatcherBuilder::new(settings)
    }

    /// Fans the event out to every sink. No-op while tracking is disabled.
    pub fn track_event(&self, event: &TrackingEvent) {
        let state = self.lock();
        if !state.enabled {
            log_dropped("track_event");
            return;
        }
        self.dispatch_event(&state, event);
    }

    /// Fans the keys out to every sink. No-op while tracking is disabled.
    pub fn track_keys(&self, keys: &KeyedEvent) {
        let state = self.lock();
        if !state.enabled {
            log_dropped("track_keys");
            return;
        }
        self.dispatch_keys(&state, keys);
    }

    /// Fans the error out to every sink. There is no debug notification or broadcast for
    /// errors.
    pub fn track_error(&self, error: &ErrorEvent) {
        let state = self.lock();
        if !state.enabled {
            log_dropped("track_error");
            return;
        }
        fan_out(&state.sinks, "track_error", |sink| sink.track_error(error));
    }

    /// Two dispatches per screen view: a keys bundle with the screen name (and class,
    /// when given), then a [`WellKnownEvent::ViewItem`] event named after the screen.
    pub fn track_screen(&self, name: &str, maybe_class_name: Option<&str>) {
        let state = self.lock();
        if !state.enabled {
            log_dropped("track_screen");
            return;
        }
        self.dispatch_keys(&state, &KeyedEvent::screen(name, maybe_class_name));
        self.dispatch_event(
            &state,
            &TrackingEvent::from_well_known(WellKnownEvent::ViewItem).with_name(name),
        );
    }

    /// Identify the user. Only the parts that are given are sent.
    pub fn track_user(
        &self,
        maybe_user_name: Option<&str>,
        maybe_email: Option<&str>,
        maybe_identifier: Option<&str>,
    ) {
        self.track_keys(&KeyedEvent::user(
            maybe_user_name,
            maybe_email,
            maybe_identifier,
        ));
    }

    /// Switch tracking on or off. The persisted value is what the next launch starts
    /// with.
    ///
    /// Switching off always presents the opt-out confirmation first, without waiting
    /// for the user to acknowledge it. The opt-out marker is tracked while tracking is
    /// still enabled, so sinks get to record it.
    pub fn set_enabled(&self, enabled: bool) {
        let mut state = self.lock();
        let was_enabled = state.enabled;

        // % is Display, ? is Debug.
        tracing::info!(
            message = "🔀 Set tracking enabled",
            from = was_enabled,
            to = enabled
        );

        if enabled {
            if !was_enabled {
                fan_out(&state.sinks, "start", |sink| sink.start());
                state.enabled = true;
            }
            self.persist(true);
            let emit_marker = !was_enabled
                || self.opt_in_marker_policy == OptInMarkerPolicy::EveryCall;
            if emit_marker {
                let opt_in = TrackingEvent::from_marker(MarkerEvent::for_enabled(enabled));
                self.dispatch_event(&state, &opt_in);
            }
        } else {
            self.presenter.confirm_opt_out(&self.opt_out_message);
            if was_enabled {
                fan_out(&state.sinks, "set_enabled", |sink| sink.set_enabled(false));
                self.dispatch_event(
                    &state,
                    &TrackingEvent::from_marker(MarkerEvent::for_enabled(enabled)),
                );
                state.enabled = false;
            }
            self.persist(false);
        }
    }

    /// Tracking state of this session.
    #[must_use]
    pub fn is_enabled(&self) -> bool { self.lock().enabled }

    /// The persisted flag, ie: the state the next launch will start in.
    #[must_use]
    pub fn tracking_enabled_for_next_launch(&self) -> bool {
        let fallback = self.lock().enabled;
        read_tracking_enabled(self.settings.as_ref(), fallback)
    }

    #[must_use]
    pub fn sink_count(&self) -> usize { self.lock().sinks.len() }

    fn lock(&self) -> MutexGuard<'_, DispatcherState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn dispatch_event(&self, state: &DispatcherState, event: &TrackingEvent) {
        if DEBUG_ANALYTICS_MOD {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "📤 Dispatch event",
                event_name = %event.event_name(),
                sink_count = state.sinks.len()
            );
        }

        fan_out(&state.sinks, "track_event", |sink| sink.track_event(event));

        if let Some(notifier) = &self.maybe_notifier {
            notifier.notify(DEBUG_NOTIFICATION_TITLE, &event.debug_info());
        }
        if let Some(broadcast) = self.listened_broadcast() {
            broadcast.publish(DebugPayload::from(event));
        }
    }

    fn dispatch_keys(&self, state: &DispatcherState, keys: &KeyedEvent) {
        if DEBUG_ANALYTICS_MOD {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "📤 Dispatch keys",
                key_count = keys.len(),
                sink_count = state.sinks.len()
            );
        }

        fan_out(&state.sinks, "track_keys", |sink| sink.track_keys(keys));

        if let Some(notifier) = &self.maybe_notifier {
            notifier.notify(DEBUG_NOTIFICATION_TITLE, &keys.debug_info());
        }
        if let Some(broadcast) = self.listened_broadcast() {
            broadcast.publish(DebugPayload::from(keys));
        }
    }

    /// The debug broadcast, if enabled and anyone is subscribed.
    fn listened_broadcast(&self) -> Option<&DebugBroadcast> {
        self.maybe_broadcast
            .as_ref()
            .filter(|broadcast| broadcast.receiver_count() > 0)
    }

    fn persist(&self, enabled: bool) {
        if let Err(report) = self.settings.write_tracking_enabled(enabled) {
            // % is Display, ? is Debug.
            tracing::error!(
                message = "Could not persist tracking flag",
                enabled = enabled,
                error = ?report
            );
        }
    }
}

fn read_tracking_enabled(settings: &dyn SettingsStore, fallback: bool) -> bool {
    match settings.read_tracking_enabled() {
        Ok(it) => it,
        Err(report) => {
            // % is Display, ? is Debug.
            tracing::warn!(
                message = "Could not read tracking flag, using fallback",
                fallback = fallback,
                error = ?report
            );
            fallback
        }
    }
}

/// Call `op` on every sink in registration order. An `Err` or a panic from one sink is
/// logged and doesn't stop the others.
fn fan_out(
    sinks: &[BoxedSink],
    op_name: &'static str,
    op: impl Fn(&dyn Sink) -> miette::Result<()>,
) {
    for sink in sinks {
        let sink: &dyn Sink = sink.as_ref();
        match std::panic::catch_unwind(AssertUnwindSafe(|| op(sink))) {
            Ok(Ok(())) => {}
            Ok(Err(report)) => {
                // % is Display, ? is Debug.
                tracing::warn!(
                    message = "Sink call failed",
                    sink = %sink.name(),
                    op = %op_name,
                    error = ?report
                );
            }
            Err(_) => {
                // % is Display, ? is Debug.
                tracing::error!(
                    message = "Sink call panicked",
                    sink = %sink.name(),
                    op = %op_name
                );
            }
        }
    }
}

fn log_dropped(op_name: &'static str) {
    if DEBUG_ANALYTICS_MOD {
        // % is Display, ? is Debug.
        tracing::debug!(message = "Tracking disabled, call dropped", op = %op_name);
    }
}
