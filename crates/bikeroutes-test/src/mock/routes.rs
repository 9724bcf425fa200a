//! In-memory route store.

use std::sync::{Arc, Mutex};

use bikeroutes_core::{Error, ErrorKind, NewRoute, Result, Route, RouteId, RouteProvider};

use super::lock;

#[derive(Debug, Default)]
struct RouteStore {
    routes: Vec<Route>,
    requests: Vec<NewRoute>,
    last_id: i64,
    failure: Option<ErrorKind>,
}

/// Mock route provider keeping routes in memory.
///
/// Ids are assigned sequentially starting after the highest seeded id.
#[derive(Debug, Clone, Default)]
pub struct MockRouteProvider {
    store: Arc<Mutex<RouteStore>>,
}

impl MockRouteProvider {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with `routes`.
    pub fn with_routes(routes: Vec<Route>) -> Self {
        let last_id = routes.iter().map(|route| route.id.get()).max().unwrap_or(0);
        let store = RouteStore {
            routes,
            last_id,
            ..RouteStore::default()
        };

        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Makes every subsequent call fail with `kind`.
    pub fn fail_with(&self, kind: ErrorKind) {
        lock(&self.store).failure = Some(kind);
    }

    /// Lets subsequent calls succeed again.
    pub fn recover(&self) {
        lock(&self.store).failure = None;
    }

    /// Returns the stored routes.
    pub fn routes(&self) -> Vec<Route> {
        lock(&self.store).routes.clone()
    }

    /// Returns every persistence request received, including failed ones.
    pub fn requests(&self) -> Vec<NewRoute> {
        lock(&self.store).requests.clone()
    }
}

#[async_trait::async_trait]
impl RouteProvider for MockRouteProvider {
    async fn load_routes(&self) -> Result<Vec<Route>> {
        let store = lock(&self.store);
        if let Some(kind) = store.failure {
            return Err(Error::new(kind).with_message("mock route store is failing"));
        }
        Ok(store.routes.clone())
    }

    async fn persist_route(&self, request: &NewRoute) -> Result<Route> {
        let mut store = lock(&self.store);
        store.requests.push(request.clone());
        if let Some(kind) = store.failure {
            return Err(Error::new(kind).with_message("mock route store is failing"));
        }

        store.last_id += 1;
        let route = request.clone().into_route(RouteId::new(store.last_id));
        store.routes.push(route.clone());
        Ok(route)
    }
}

#[cfg(test)]
mod tests {
    use bikeroutes_core::{LatLng, RoadAttributes, SnappedPath};

    use super::*;

    fn request() -> NewRoute {
        NewRoute::new(
            SnappedPath::new(vec![LatLng::new(51.09, 3.75)]),
            RoadAttributes::default(),
        )
    }

    #[tokio::test]
    async fn ids_continue_after_seeded_routes() {
        let seeded = request().into_route(RouteId::new(41));
        let provider = MockRouteProvider::with_routes(vec![seeded]);

        let route = provider.persist_route(&request()).await.unwrap();
        assert_eq!(route.id, RouteId::new(42));
        assert_eq!(provider.load_routes().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn failures_can_be_switched_off() {
        let provider = MockRouteProvider::new();
        provider.fail_with(ErrorKind::Timeout);
        assert_eq!(
            provider.load_routes().await.unwrap_err().kind,
            ErrorKind::Timeout
        );
        assert!(provider.persist_route(&request()).await.is_err());
        assert_eq!(provider.requests().len(), 1);

        provider.recover();
        assert!(provider.persist_route(&request()).await.is_ok());
        assert_eq!(provider.routes().len(), 1);
    }
}
