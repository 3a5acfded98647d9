// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Process wide publish / subscribe channel that QA tooling can listen on to observe
//! live events without hooking into any particular [`crate::Sink`].
//!
//! Every message is tagged with the channel name it was published on, which defaults to
//! [`DEBUG_BROADCAST_CHANNEL_NAME`]. Publishing when nobody is subscribed is fine, the
//! message is simply dropped.

use std::sync::OnceLock;

use beacon_analytics_schema::DebugPayload;
use tokio::sync::broadcast;

use crate::DEBUG_ANALYTICS_MOD;

pub const DEBUG_BROADCAST_CHANNEL_NAME: &str = "beacon.analytics.debugger.did_receive_item";

/// Slow receivers that fall this far behind start to lose the oldest messages.
const CHANNEL_CAPACITY: usize = 1_024;

#[derive(Clone, Debug, PartialEq)]
pub struct DebugBroadcastMessage {
    pub channel: String,
    pub payload: DebugPayload,
}

/// Cloning shares the underlying channel.
#[derive(Clone, Debug)]
pub struct DebugBroadcast {
    channel_name: String,
    sender: broadcast::Sender<DebugBroadcastMessage>,
}

impl Default for DebugBroadcast {
    fn default() -> Self { Self::new(DEBUG_BROADCAST_CHANNEL_NAME) }
}

impl DebugBroadcast {
    /// A private channel. Use [`DebugBroadcast::global`] for the process wide one.
    #[must_use]
    pub fn new(channel_name: impl Into<String>) -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            channel_name: channel_name.into(),
            sender,
        }
    }

    /// The process wide instance, created on first use.
    pub fn global() -> &'static DebugBroadcast {
        static GLOBAL: OnceLock<DebugBroadcast> = OnceLock::new();
        GLOBAL.get_or_init(DebugBroadcast::default)
    }

    #[must_use]
    pub fn channel_name(&self) -> &str { &self.channel_name }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DebugBroadcastMessage> {
        self.sender.subscribe()
    }

    /// Publishing is skipped while this is zero.
    #[must_use]
    pub fn receiver_count(&self) -> usize { self.sender.receiver_count() }

    /// Returns the number of receivers that got the message.
    pub fn publish(&self, payload: DebugPayload) -> usize {
        let message = DebugBroadcastMessage {
            channel: self.channel_name.clone(),
            payload,
        };
        match self.sender.send(message) {
            Ok(receiver_count) => receiver_count,
            Err(_) => {
                if DEBUG_ANALYTICS_MOD {
                    // % is Display, ? is Debug.
                    tracing::debug!(
                        message = "No debug broadcast receivers, message dropped",
                        channel = %self.channel_name
                    );
                }
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use beacon_analytics_schema::TrackingEvent;
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn test_publish_reaches_every_subscriber() {
        let broadcast = DebugBroadcast::default();
        assert_eq!(broadcast.receiver_count(), 0);
        let mut rx_1 = broadcast.subscribe();
        let mut rx_2 = broadcast.subscribe();
        assert_eq!(broadcast.receiver_count(), 2);

        let event = TrackingEvent::try_new("purchase").unwrap().with_item_id("42");
        let payload = DebugPayload::from(&event);
        assert_eq!(broadcast.publish(payload.clone()), 2);

        for rx in [&mut rx_1, &mut rx_2] {
            let message = rx.recv().await.unwrap();
            assert_eq!(message.channel, DEBUG_BROADCAST_CHANNEL_NAME);
            assert_eq!(message.payload, payload);
        }
    }

    #[test]
    fn test_publish_without_subscribers_is_not_an_error() {
        let broadcast = DebugBroadcast::new("private");
        let event = TrackingEvent::try_new("purchase").unwrap();
        assert_eq!(broadcast.publish(DebugPayload::from(&event)), 0);
        assert_eq!(broadcast.channel_name(), "private");
    }

    #[test]
    fn test_global_is_a_singleton() {
        let a = DebugBroadcast::global();
        let b = DebugBroadcast::global();
        assert!(std::ptr::eq(a, b));
        assert_eq!(a.channel_name(), DEBUG_BROADCAST_CHANNEL_NAME);
    }
}
