//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};

use room_core::CrossRoomClue;

use super::types::{ProgressUpdate, RoomEvent};

/// Topics for event routing.
///
/// Subscribing to a single topic is how UI subtrees watch one slice of the
/// session (progress bar, clue log, relay bridge) without waking on
/// unrelated changes.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Element interactions, solves, discoveries, completion.
    Room,
    /// Aggregate progress snapshots.
    Progress,
    /// Cross-room clue emissions for the external relay.
    Relay,
}

/// Event wrapper that carries the topic and typed event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Room(RoomEvent),
    Progress(ProgressUpdate),
    Relay(CrossRoomClue),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Room(_) => Topic::Room,
            Event::Progress(_) => Topic::Progress,
            Event::Relay(_) => Topic::Relay,
        }
    }
}

/// Topic-based event bus.
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about.
#[derive(Debug)]
pub struct EventBus {
    channels: Arc<RwLock<HashMap<Topic, broadcast::Sender<Event>>>>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic.
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut channels = HashMap::new();

        // Pre-create channels for each topic
        channels.insert(Topic::Room, broadcast::channel(capacity).0);
        channels.insert(Topic::Progress, broadcast::channel(capacity).0);
        channels.insert(Topic::Relay, broadcast::channel(capacity).0);

        Self {
            channels: Arc::new(RwLock::new(channels)),
        }
    }

    /// Publish an event to its corresponding topic.
    ///
    /// Publication is best-effort: no subscribers is normal, and a contended
    /// lock drops the event rather than blocking the session worker.
    pub fn publish(&self, event: Event) {
        let topic = event.topic();

        match self.channels.try_read() {
            Ok(channels) => {
                if let Some(tx) = channels.get(&topic)
                    && tx.send(event).is_err()
                {
                    tracing::trace!("No subscribers for topic {:?}", topic);
                }
            }
            Err(_) => {
                tracing::debug!("Failed to acquire event bus lock for topic {:?}", topic);
            }
        }
    }

    /// Subscribe to a specific topic.
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        let channels = self
            .channels
            .try_read()
            .expect("Failed to acquire read lock on event channels");
        channels
            .get(&topic)
            .expect("Topic channel not initialized")
            .subscribe()
    }

    /// Subscribe to multiple topics.
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        let channels = self
            .channels
            .try_read()
            .expect("Failed to acquire read lock on event channels");
        topics
            .iter()
            .map(|&topic| {
                let rx = channels
                    .get(&topic)
                    .expect("Topic channel not initialized")
                    .subscribe();
                (topic, rx)
            })
            .collect()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            channels: Arc::clone(&self.channels),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
