// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::Debug,
          sync::{Arc, Mutex, PoisonError}};

/// Used until a value is written, or another default is registered.
pub const DEFAULT_TRACKING_ENABLED: bool = true;

/// Persists the single "tracking enabled" flag. The value that is read at startup
/// decides whether the [`crate::Dispatcher`] starts Enabled or Disabled, and the value
/// written by [`crate::Dispatcher::set_enabled`] is what the *next* launch will see.
pub trait SettingsStore: Send + Sync + Debug {
    /// Value returned by [`SettingsStore::read_tracking_enabled`] before anything has
    /// been written. Call this on first run.
    fn register_default(&self, enabled: bool);

    /// # Errors
    ///
    /// Returns an error if the backing store can't be read.
    fn read_tracking_enabled(&self) -> miette::Result<bool>;

    /// # Errors
    ///
    /// Returns an error if the backing store can't be written.
    fn write_tracking_enabled(&self, enabled: bool) -> miette::Result<()>;
}

#[derive(Debug, Clone, Copy)]
struct InMemoryState {
    default: bool,
    maybe_value: Option<bool>,
}

/// Process local store. Clones share the same state, so building a second dispatcher
/// from a clone behaves like a restart of the process.
#[derive(Debug, Clone)]
pub struct InMemorySettingsStore {
    state: Arc<Mutex<InMemoryState>>,
}

impl Default for InMemorySettingsStore {
    fn default() -> Self {
        Self {
            state: Arc::new(Mutex::new(InMemoryState {
                default: DEFAULT_TRACKING_ENABLED,
                maybe_value: None,
            })),
        }
    }
}

impl InMemorySettingsStore {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Store that already holds `enabled`, as if a previous run had written it.
    #[must_use]
    pub fn with_value(enabled: bool) -> Self {
        let it = Self::default();
        it.lock().maybe_value = Some(enabled);
        it
    }

    /// The written value, if any. Ignores the registered default.
    #[must_use]
    pub fn written_value(&self) -> Option<bool> { self.lock().maybe_value }

    fn lock(&self) -> std::sync::MutexGuard<'_, InMemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SettingsStore for InMemorySettingsStore {
    fn register_default(&self, enabled: bool) { self.lock().default = enabled; }

    fn read_tracking_enabled(&self) -> miette::Result<bool> {
        let state = self.lock();
        Ok(state.maybe_value.unwrap_or(state.default))
    }

    fn write_tracking_enabled(&self, enabled: bool) -> miette::Result<()> {
        self.lock().maybe_value = Some(enabled);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_before_first_write() {
        let store = InMemorySettingsStore::new();
        assert_eq!(store.read_tracking_enabled().unwrap(), DEFAULT_TRACKING_ENABLED);

        store.register_default(false);
        assert!(!store.read_tracking_enabled().unwrap());
        assert_eq!(store.written_value(), None);
    }

    #[test]
    fn test_written_value_wins_over_default() {
        let store = InMemorySettingsStore::new();
        store.register_default(false);
        store.write_tracking_enabled(true).unwrap();
        assert!(store.read_tracking_enabled().unwrap());
    }

    #[test]
    fn test_clones_share_state() {
        let store = InMemorySettingsStore::with_value(true);
        let clone = store.clone();
        clone.write_tracking_enabled(false).unwrap();
        assert!(!store.read_tracking_enabled().unwrap());
    }
}
