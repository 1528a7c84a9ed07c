//! Topic-based replication fan-out.
//!
//! The bus is the in-process stand-in for the transport layer: every
//! subscriber sees the same ordered stream per topic, mirroring the
//! per-field ordering guarantee clients are allowed to rely on.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use hearth_core::protocol::{Broadcast, FieldUpdate};

/// Topics for event routing.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Persistent state replication (field updates).
    Replication,
    /// One-shot broadcast effects (spawns, swings, inventory changes).
    Effect,
}

/// Event wrapper that carries the topic and typed payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Field(FieldUpdate),
    Effect(Broadcast),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Field(_) => Topic::Replication,
            Event::Effect(_) => Topic::Effect,
        }
    }
}

/// Topic-based event bus.
///
/// Consumers subscribe to the topics they care about; publishing is
/// best-effort (a topic with no subscribers drops its events).
#[derive(Clone)]
pub struct EventBus {
    replication: broadcast::Sender<Event>,
    effect: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            replication: broadcast::channel(capacity).0,
            effect: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Replication => &self.replication,
            Topic::Effect => &self.effect,
        }
    }

    /// Publish an event to its corresponding topic. Events are
    /// best-effort from the bus's perspective; a topic without
    /// subscribers drops them.
    pub fn publish(&self, event: Event) {
        let _ = self.sender(event.topic()).send(event);
    }

    /// Subscribe to events from a specific topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
