// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Opt-out and opt-in survive a restart when the flag is persisted on disk.

use std::{path::PathBuf,
          sync::{Arc, Mutex}};

use beacon_analytics::{DispatcherBuilder, KvSettingsStore, Sink, TrackingEvent};
use pretty_assertions::assert_eq;

#[derive(Debug, Default, Clone)]
struct EventNames {
    inner: Arc<Mutex<Vec<String>>>,
}

#[derive(Debug)]
struct CollectingSink {
    names: EventNames,
}

impl Sink for CollectingSink {
    fn name(&self) -> &str { "collecting" }

    fn start(&self) -> miette::Result<()> { Ok(()) }

    fn track_event(&self, event: &TrackingEvent) -> miette::Result<()> {
        self.names
            .inner
            .lock()
            .unwrap()
            .push(event.event_name().to_string());
        Ok(())
    }
}

struct TempFolder(PathBuf);

impl Drop for TempFolder {
    fn drop(&mut self) { let _unused = std::fs::remove_dir_all(&self.0); }
}

fn launch(folder: &TempFolder, names: &EventNames) -> beacon_analytics::Dispatcher {
    DispatcherBuilder::new(KvSettingsStore::open(&folder.0).unwrap())
        .add_sink(CollectingSink {
            names: names.clone(),
        })
        .build()
}

#[test]
fn test_opt_out_then_opt_in_across_restarts() {
    let folder = TempFolder(
        std::env::temp_dir().join(format!("beacon_restart_{}", uuid::Uuid::new_v4())),
    );
    let names = EventNames::default();

    // First launch ever: enabled by default.
    {
        let dispatcher = launch(&folder, &names);
        assert!(dispatcher.is_enabled());
        dispatcher.set_enabled(false);
        assert!(!dispatcher.tracking_enabled_for_next_launch());
    }

    // Second launch: starts disabled, nothing is tracked.
    {
        let dispatcher = launch(&folder, &names);
        assert!(!dispatcher.is_enabled());
        dispatcher.track_event(&TrackingEvent::try_new("ignored").unwrap());
        dispatcher.set_enabled(true);
    }

    // Third launch: enabled again.
    {
        let dispatcher = launch(&folder, &names);
        assert!(dispatcher.is_enabled());
    }

    assert_eq!(
        *names.inner.lock().unwrap(),
        vec![
            "tracking_opt_in",
            "tracking_opt_out",
            "tracking_opt_in",
            "tracking_opt_in",
        ]
    );
}
