//! Route persistence over `GET`/`PUT /api/routes`.

use std::time::Instant;

use bikeroutes_core::{NewRoute, Route, RouteProvider};

use super::ROUTES_PATH;
use crate::connect::{ApiClient, TRACING_TARGET};

#[async_trait::async_trait]
impl RouteProvider for ApiClient {
    async fn load_routes(&self) -> bikeroutes_core::Result<Vec<Route>> {
        let started_at = Instant::now();
        let url = self.endpoint(ROUTES_PATH)?;

        tracing::debug!(target: TRACING_TARGET, url = %url, "Fetching routes");

        let routes: Vec<Route> = self.fetch_json(self.http().get(url)).await?;

        tracing::debug!(
            target: TRACING_TARGET,
            route_count = routes.len(),
            elapsed_ms = started_at.elapsed().as_millis(),
            "Routes fetched"
        );

        Ok(routes)
    }

    async fn persist_route(&self, request: &NewRoute) -> bikeroutes_core::Result<Route> {
        let started_at = Instant::now();
        let url = self.endpoint(ROUTES_PATH)?;

        tracing::debug!(
            target: TRACING_TARGET,
            url = %url,
            points = request.snapped_coordinates.len(),
            "Persisting route"
        );

        let route: Route = self.fetch_json(self.http().put(url).json(request)).await?;

        tracing::debug!(
            target: TRACING_TARGET,
            route_id = %route.id,
            elapsed_ms = started_at.elapsed().as_millis(),
            "Route persisted"
        );

        Ok(route)
    }
}
