use crate::{storage::KeyValueStore, AppResult};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::warn;
use trip_planner_sdk::Itinerary;

/// Store key of the cached itinerary.
pub const ITINERARY_CACHE_KEY: &str = "itinerary";

/// Persisted copy of the most recently generated itinerary. Holds one
/// itinerary at a time and is overwritten wholesale.
pub struct ItineraryCache {
    store: Arc<dyn KeyValueStore>,
}

impl ItineraryCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn save(&self, itinerary: &Itinerary) -> AppResult<()> {
        self.store
            .set(ITINERARY_CACHE_KEY, &serde_json::to_string(itinerary)?)
    }

    /// The cached itinerary. Unreadable entries are logged and treated as
    /// missing.
    #[must_use]
    pub fn load(&self) -> Option<Itinerary> {
        let raw = match self.store.get(ITINERARY_CACHE_KEY) {
            Ok(raw) => raw?,
            Err(error) => {
                warn!(%error, "failed to read the cached itinerary");
                return None;
            }
        };

        serde_json::from_str(&raw)
            .inspect_err(|error| warn!(%error, "ignoring unreadable cached itinerary"))
            .ok()
    }
}

/// The itinerary being viewed, shared by the search form and the timeline.
pub struct ItineraryStore {
    current: RwLock<Option<Itinerary>>,
    cache: ItineraryCache,
}

impl ItineraryStore {
    #[must_use]
    pub fn new(cache: ItineraryCache) -> Self {
        Self {
            current: RwLock::new(None),
            cache,
        }
    }

    /// The in-memory itinerary only.
    #[must_use]
    pub fn current(&self) -> Option<Itinerary> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the in-memory itinerary and mirror it to the cache. A failed
    /// cache write is logged; the in-memory value is kept regardless.
    pub fn set(&self, itinerary: Itinerary) {
        if let Err(error) = self.cache.save(&itinerary) {
            warn!(%error, "failed to cache the itinerary");
        }
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(itinerary);
    }

    /// The itinerary to display: in memory if present, else the cached one.
    #[must_use]
    pub fn resolve(&self) -> Option<Itinerary> {
        self.current().or_else(|| self.cache.load())
    }

    #[must_use]
    pub fn cache(&self) -> &ItineraryCache {
        &self.cache
    }
}
