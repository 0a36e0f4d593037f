//! Cached views and their invalidation

use super::events::{EventBus, ViewEvent};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Marks a rendered view stale so the next request regenerates it
pub trait PathRevalidator: Send + Sync {
    fn revalidate_path(&self, path: &str);
}

#[derive(Debug, Default)]
struct CachedPath {
    generation: u64,
    view: Option<Value>,
}

/// In-process cache of rendered views, keyed by route path
///
/// Each path carries a generation counter that only moves forward. A view rendered
/// while the path was at generation `g` is only stored if the path is still at `g`,
/// so a render racing with a revalidation never resurrects stale data.
#[derive(Debug, Clone, Default)]
pub struct ViewCache {
    paths: Arc<RwLock<HashMap<String, CachedPath>>>,
    events: Option<EventBus>,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish every revalidation on `bus`
    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    pub fn event_bus(&self) -> Option<&EventBus> {
        self.events.as_ref()
    }

    /// Current generation of `path` (0 if never revalidated)
    pub fn generation(&self, path: &str) -> u64 {
        self.paths
            .read()
            .map(|paths| paths.get(path).map_or(0, |p| p.generation))
            .unwrap_or(0)
    }

    /// Cached view for `path`, if one is stored
    pub fn get(&self, path: &str) -> Option<Value> {
        self.paths
            .read()
            .ok()?
            .get(path)
            .and_then(|p| p.view.clone())
    }

    /// Store `view` as rendered at `generation`
    ///
    /// Returns `false` (and stores nothing) if the path was revalidated since.
    pub fn store(&self, path: &str, generation: u64, view: Value) -> bool {
        let Ok(mut paths) = self.paths.write() else {
            return false;
        };
        let entry = paths.entry(path.to_string()).or_default();
        if entry.generation != generation {
            return false;
        }
        entry.view = Some(view);
        true
    }
}

impl PathRevalidator for ViewCache {
    fn revalidate_path(&self, path: &str) {
        let generation = match self.paths.write() {
            Ok(mut paths) => {
                let entry = paths.entry(path.to_string()).or_default();
                entry.generation += 1;
                entry.view = None;
                entry.generation
            }
            Err(e) => {
                tracing::error!(path, error = %e, "view cache lock poisoned");
                return;
            }
        };

        tracing::info!(path, generation, "revalidated view");

        if let Some(bus) = &self.events {
            bus.publish(ViewEvent::Revalidated {
                path: path.to_string(),
                generation,
            });
        }
    }
}
