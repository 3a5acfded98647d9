// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::Debug;

use notify_rust::Notification;

/// Title of every debug notification. The body is the event's digest.
pub const DEBUG_NOTIFICATION_TITLE: &str = "Track event";

/// How long a desktop notification stays on screen.
pub const DEBUG_NOTIFICATION_TIMEOUT_MS: u32 = 2_000;

/// Shows a local, one-shot notification for each tracked event. Implementations must
/// not block the caller for long, and must swallow their own failures.
pub trait DebugNotifier: Send + Sync + Debug {
    fn notify(&self, title: &str, body: &str);
}

/// Desktop notification via [`notify_rust`].
///
/// When called from inside a tokio runtime the notification is shown on a blocking
/// task, so the dispatcher never waits on the desktop notification daemon. Outside a
/// runtime it is shown inline.
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopNotifier;

impl DebugNotifier for DesktopNotifier {
    fn notify(&self, title: &str, body: &str) {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let title = title.to_string();
                let body = body.to_string();
                drop(handle.spawn_blocking(move || show_notification(&title, &body)));
            }
            Err(_) => show_notification(title, body),
        }
    }
}

/// Show a desktop notification, logging a warning if the platform refuses it.
pub fn show_notification(title: &str, message: &str) {
    if let Err(e) = Notification::new()
        .summary(title)
        .body(message)
        .timeout(notify_rust::Timeout::Milliseconds(DEBUG_NOTIFICATION_TIMEOUT_MS))
        .show()
    {
        tracing::warn!("Failed to show notification '{}': {}", title, e);
    }
}
