//! Route persistence service wrapper.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use super::TRACING_TARGET_ROUTES;
use crate::{NewRoute, Result, RoadAttributes, Route, RouteProvider, SnappedPath};

/// Route persistence service with structured logging.
#[derive(Clone)]
pub struct RouteService {
    inner: Arc<dyn RouteProvider>,
}

impl fmt::Debug for RouteService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteService").finish_non_exhaustive()
    }
}

impl RouteService {
    /// Creates a new route service wrapper.
    pub fn new<P>(provider: P) -> Self
    where
        P: RouteProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Loads every persisted route.
    pub async fn load_routes(&self) -> Result<Vec<Route>> {
        let started_at = Instant::now();
        tracing::debug!(target: TRACING_TARGET_ROUTES, "Loading existing routes");

        let result = self.inner.load_routes().await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(routes) => {
                tracing::debug!(
                    target: TRACING_TARGET_ROUTES,
                    route_count = routes.len(),
                    elapsed_ms = elapsed.as_millis(),
                    "Existing routes loaded"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET_ROUTES,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Failed to load existing routes"
                );
            }
        }

        result
    }

    /// Persists a snapped path with the given attributes.
    pub async fn persist_route(
        &self,
        points: SnappedPath,
        attributes: RoadAttributes,
    ) -> Result<Route> {
        let started_at = Instant::now();
        let request = NewRoute::new(points, attributes);

        tracing::debug!(
            target: TRACING_TARGET_ROUTES,
            points = request.snapped_coordinates.len(),
            road_type = %request.road_type,
            surface = %request.road_surface,
            condition = %request.road_condition,
            "Persisting route"
        );

        let result = self.inner.persist_route(&request).await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(route) => {
                tracing::info!(
                    target: TRACING_TARGET_ROUTES,
                    route_id = %route.id,
                    points = route.points.len(),
                    elapsed_ms = elapsed.as_millis(),
                    "Route persisted"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET_ROUTES,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Failed to persist route"
                );
            }
        }

        result
    }
}
