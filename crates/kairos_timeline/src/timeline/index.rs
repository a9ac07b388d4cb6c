use std::sync::Arc;

use fxhash::FxHashMap;
use jiff::Timestamp;
use parking_lot::RwLock;
use tracing::debug;

use crate::{
    error::TimelineError,
    schedule::repository::{RouteId, RouteRepository},
    timeline::{builder::build_timeline, timeline::Timeline},
};

struct CacheEntry {
    version: u64,
    timeline: Option<Arc<Timeline>>,
}

/// Memoizing timeline lookup, keyed by route id and repository version.
///
/// A route's timeline is rebuilt only when its stored data changed; while it
/// is unchanged, repeated lookups hand back the same `Arc` so downstream
/// consumers can skip their own recomputation. Readers never block each
/// other; the write lock is held only to install a rebuilt entry. Build
/// failures propagate and are not cached: the computation is deterministic,
/// so a failing route fails identically on every lookup.
#[derive(Default)]
pub struct TimelineIndex {
    cache: RwLock<FxHashMap<RouteId, CacheEntry>>,
}

impl TimelineIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the timeline for `route_id`, rebuilding it if the stored
    /// route data changed since the last lookup. Returns `Ok(None)` when the
    /// route is unknown or has no visits.
    pub fn get(
        &self,
        repository: &RouteRepository,
        route_id: RouteId,
    ) -> Result<Option<Arc<Timeline>>, TimelineError> {
        let Some(stored) = repository.get(route_id) else {
            return Ok(None);
        };

        {
            let cache = self.cache.read();
            if let Some(entry) = cache.get(&route_id)
                && entry.version == stored.version()
            {
                return Ok(entry.timeline.clone());
            }
        }

        let rebuild_started = Timestamp::now();
        let timeline = build_timeline(stored.route(), stored.visits())?.map(Arc::new);
        debug!(
            route_id = %route_id,
            elapsed = ?Timestamp::now().duration_since(rebuild_started),
            "rebuilt route timeline"
        );

        let mut cache = self.cache.write();
        // Another writer may have installed the same version meanwhile; keep
        // its entry so their consumers retain a stable reference.
        if let Some(entry) = cache.get(&route_id)
            && entry.version == stored.version()
        {
            return Ok(entry.timeline.clone());
        }

        cache.insert(
            route_id,
            CacheEntry {
                version: stored.version(),
                timeline: timeline.clone(),
            },
        );

        Ok(timeline)
    }

    /// Drops cached entries whose route no longer exists in the repository or
    /// changed since the entry was built.
    pub fn prune(&self, repository: &RouteRepository) {
        self.cache.write().retain(|route_id, entry| {
            repository
                .get(*route_id)
                .is_some_and(|stored| stored.version() == entry.version)
        });
    }

    /// Number of routes with a cached entry.
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }
}
