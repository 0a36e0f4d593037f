//! Broadcast of view revalidations
//!
//! Every time an action marks a cached view stale, the [`ViewCache`](super::cache::ViewCache)
//! publishes a [`ViewEvent`] here. Anything that mirrors rendered views (a live-reload
//! socket, a CDN purger) subscribes instead of polling.
//!
//! ```rust,ignore
//! let bus = EventBus::new(64);
//! let mut rx = bus.subscribe();
//!
//! cache.revalidate_path("/dashboard/invoices");
//!
//! let envelope = rx.recv().await?;
//! assert_eq!(envelope.event.path(), "/dashboard/invoices");
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Something happened to a cached view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ViewEvent {
    /// The view at `path` was marked stale; `generation` is its new generation number
    Revalidated { path: String, generation: u64 },
}

impl ViewEvent {
    pub fn path(&self) -> &str {
        match self {
            ViewEvent::Revalidated { path, .. } => path,
        }
    }

    pub fn action(&self) -> &str {
        match self {
            ViewEvent::Revalidated { .. } => "revalidated",
        }
    }
}

/// Envelope wrapping a view event with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub event: ViewEvent,
}

impl EventEnvelope {
    pub fn new(event: ViewEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Broadcast-based event bus
///
/// Cheap to clone; every clone publishes to the same subscribers.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    /// Create a bus buffering up to `capacity` events for slow receivers
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish to all current subscribers
    ///
    /// Never fails; returns how many receivers will see the event (0 when nobody listens).
    pub fn publish(&self, event: ViewEvent) -> usize {
        self.sender.send(EventEnvelope::new(event)).unwrap_or(0)
    }

    /// Receive every event published after this call
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}
