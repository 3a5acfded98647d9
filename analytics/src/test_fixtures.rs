// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Recording doubles for the collaborators of [`crate::Dispatcher`]. They all write into
//! one shared [`Journal`], so a test can assert on the relative order of sink calls,
//! presenter calls, notifications and settings writes.

use std::{path::{Path, PathBuf},
          sync::{Arc, Mutex}};

use beacon_analytics_schema::{ErrorEvent, KeyedEvent, TrackingEvent};
use miette::IntoDiagnostic;

use crate::{DebugNotifier, InMemorySettingsStore, OptOutMessage, OptOutPresenter,
            SettingsStore, Sink,
            log::{TracingConfig, install_thread_local}};

#[derive(Clone, Debug, PartialEq)]
pub enum JournalEntry {
    Start { sink: String },
    Event { sink: String, event: TrackingEvent },
    Keys { sink: String, keys: KeyedEvent },
    Error { sink: String, error: ErrorEvent },
    SetEnabled { sink: String, enabled: bool },
    Persisted(bool),
    OptOutPresented(OptOutMessage),
    Notified { title: String, body: String },
}

#[derive(Clone, Debug, Default)]
pub struct Journal {
    entries: Arc<Mutex<Vec<JournalEntry>>>,
}

impl Journal {
    pub fn push(&self, entry: JournalEntry) { self.entries.lock().unwrap().push(entry); }

    pub fn entries(&self) -> Vec<JournalEntry> { self.entries.lock().unwrap().clone() }

    pub fn clear(&self) { self.entries.lock().unwrap().clear(); }

    pub fn events_for(&self, sink_name: &str) -> Vec<TrackingEvent> {
        self.entries()
            .into_iter()
            .filter_map(|entry| match entry {
                JournalEntry::Event { sink, event } if sink == sink_name => Some(event),
                _ => None,
            })
            .collect()
    }

    pub fn event_names_for(&self, sink_name: &str) -> Vec<String> {
        self.events_for(sink_name)
            .iter()
            .map(|event| event.event_name().to_string())
            .collect()
    }

    pub fn keys_for(&self, sink_name: &str) -> Vec<KeyedEvent> {
        self.entries()
            .into_iter()
            .filter_map(|entry| match entry {
                JournalEntry::Keys { sink, keys } if sink == sink_name => Some(keys),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, predicate: impl Fn(&JournalEntry) -> bool) -> usize {
        self.entries().iter().filter(|entry| predicate(entry)).count()
    }
}

#[derive(Debug)]
pub struct RecordingSink {
    pub name: String,
    pub journal: Journal,
}

impl RecordingSink {
    pub fn new(name: &str, journal: &Journal) -> Self {
        Self {
            name: name.to_string(),
            journal: journal.clone(),
        }
    }
}

impl Sink for RecordingSink {
    fn name(&self) -> &str { &self.name }

    fn start(&self) -> miette::Result<()> {
        self.journal.push(JournalEntry::Start {
            sink: self.name.clone(),
        });
        Ok(())
    }

    fn track_event(&self, event: &TrackingEvent) -> miette::Result<()> {
        self.journal.push(JournalEntry::Event {
            sink: self.name.clone(),
            event: event.clone(),
        });
        Ok(())
    }

    fn track_keys(&self, keys: &KeyedEvent) -> miette::Result<()> {
        self.journal.push(JournalEntry::Keys {
            sink: self.name.clone(),
            keys: keys.clone(),
        });
        Ok(())
    }

    fn track_error(&self, error: &ErrorEvent) -> miette::Result<()> {
        self.journal.push(JournalEntry::Error {
            sink: self.name.clone(),
            error: error.clone(),
        });
        Ok(())
    }

    fn set_enabled(&self, enabled: bool) -> miette::Result<()> {
        self.journal.push(JournalEntry::SetEnabled {
            sink: self.name.clone(),
            enabled,
        });
        Ok(())
    }
}

/// Every call reports a backend failure.
#[derive(Debug)]
pub struct FailingSink;

impl Sink for FailingSink {
    fn name(&self) -> &str { "failing" }

    fn start(&self) -> miette::Result<()> {
        Err(miette::miette!("backend refused to start"))
    }

    fn track_event(&self, _: &TrackingEvent) -> miette::Result<()> {
        Err(miette::miette!("backend rejected event"))
    }

    fn track_keys(&self, _: &KeyedEvent) -> miette::Result<()> {
        Err(miette::miette!("backend rejected keys"))
    }

    fn set_enabled(&self, _: bool) -> miette::Result<()> {
        Err(miette::miette!("backend can't toggle"))
    }
}

#[derive(Debug)]
pub struct PanickingSink;

impl Sink for PanickingSink {
    fn name(&self) -> &str { "panicking" }

    fn start(&self) -> miette::Result<()> { Ok(()) }

    fn track_event(&self, _: &TrackingEvent) -> miette::Result<()> {
        panic!("backend blew up")
    }
}

#[derive(Debug)]
pub struct RecordingPresenter {
    pub journal: Journal,
}

impl OptOutPresenter for RecordingPresenter {
    fn confirm_opt_out(&self, message: &OptOutMessage) {
        self.journal
            .push(JournalEntry::OptOutPresented(message.clone()));
    }
}

#[derive(Debug)]
pub struct RecordingNotifier {
    pub journal: Journal,
}

impl DebugNotifier for RecordingNotifier {
    fn notify(&self, title: &str, body: &str) {
        self.journal.push(JournalEntry::Notified {
            title: title.to_string(),
            body: body.to_string(),
        });
    }
}

/// Shares state with the wrapped [`InMemorySettingsStore`] and journals every write.
#[derive(Debug, Clone)]
pub struct RecordingSettingsStore {
    pub inner: InMemorySettingsStore,
    pub journal: Journal,
}

impl SettingsStore for RecordingSettingsStore {
    fn register_default(&self, enabled: bool) { self.inner.register_default(enabled); }

    fn read_tracking_enabled(&self) -> miette::Result<bool> {
        self.inner.read_tracking_enabled()
    }

    fn write_tracking_enabled(&self, enabled: bool) -> miette::Result<()> {
        self.journal.push(JournalEntry::Persisted(enabled));
        self.inner.write_tracking_enabled(enabled)
    }
}

/// Can neither be read nor written.
#[derive(Debug)]
pub struct BrokenSettingsStore;

impl SettingsStore for BrokenSettingsStore {
    fn register_default(&self, _: bool) {}

    fn read_tracking_enabled(&self) -> miette::Result<bool> {
        Err(miette::miette!("settings unreadable"))
    }

    fn write_tracking_enabled(&self, _: bool) -> miette::Result<()> {
        Err(miette::miette!("settings read only"))
    }
}

/// Removed from disk when dropped.
#[derive(Debug)]
pub struct TempDir {
    pub inner: PathBuf,
}

impl TempDir {
    pub fn join<P: AsRef<Path>>(&self, path: P) -> PathBuf { self.inner.join(path) }
}

impl Drop for TempDir {
    fn drop(&mut self) { let _unused = std::fs::remove_dir_all(&self.inner); }
}

pub fn try_create_temp_dir() -> miette::Result<TempDir> {
    let root = std::env::temp_dir();
    let new_temp_dir = root.join(format!("beacon_analytics_{}", uuid::Uuid::new_v4()));
    std::fs::create_dir(&new_temp_dir).into_diagnostic()?;
    Ok(TempDir {
        inner: new_temp_dir,
    })
}

/// Run `op` with a thread local subscriber that writes into a temp log file, and return
/// everything that got logged.
pub fn capture_logs(op: impl FnOnce()) -> String {
    let root_temp_dir = try_create_temp_dir().unwrap();
    let log_file = root_temp_dir.join("captured.log");
    {
        let config = TracingConfig::new_file(Some(log_file.display().to_string()));
        let _guard = install_thread_local(config).unwrap();
        op();
    }
    std::fs::read_to_string(&log_file).unwrap_or_default()
}
