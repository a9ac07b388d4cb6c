use fxhash::FxHashMap;

use crate::{
    define_id_newtype,
    schedule::{route::Route, visit::Visit},
};

define_id_newtype!(RouteId);

/// A route together with its ordered visits, plus the version counter the
/// timeline index keys its memoization on. The version is bumped on every
/// replace, never reused.
pub struct StoredRoute {
    route: Route,
    visits: Vec<Visit>,
    version: u64,
}

impl StoredRoute {
    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}

/// In-memory store of routes and their visits, handing out immutable
/// snapshots. Consumers read a route's data and version; all mutation goes
/// through `insert`/`replace`/`remove`.
#[derive(Default)]
pub struct RouteRepository {
    routes: FxHashMap<RouteId, StoredRoute>,
    next_id: usize,
}

impl RouteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, route: Route, visits: Vec<Visit>) -> RouteId {
        let id = RouteId::new(self.next_id);
        self.next_id += 1;
        self.routes.insert(
            id,
            StoredRoute {
                route,
                visits,
                version: 0,
            },
        );

        id
    }

    /// Replaces a route's data, bumping its version. Returns `false` when the
    /// id is unknown.
    pub fn replace(&mut self, id: RouteId, route: Route, visits: Vec<Visit>) -> bool {
        match self.routes.get_mut(&id) {
            Some(stored) => {
                stored.route = route;
                stored.visits = visits;
                stored.version += 1;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: RouteId) -> Option<StoredRoute> {
        self.routes.remove(&id)
    }

    pub fn get(&self, id: RouteId) -> Option<&StoredRoute> {
        self.routes.get(&id)
    }

    pub fn route_ids(&self) -> impl Iterator<Item = RouteId> + '_ {
        self.routes.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
