#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;
#[doc(hidden)]
pub mod prelude;
pub mod service;
pub mod types;

pub use error::{BoxedError, Error, ErrorKind, Result};
pub use service::{RouteService, SnapService, VoteService};
pub use types::{
    DrawnPath, EncodedPath, INITIAL_CENTER, INITIAL_ZOOM, LatLng, NewRoute, Polyline,
    RoadAttributes, RoadCondition, RoadSurface, RoadType, Route, RouteColor, RouteId,
    SnappedPath, VoteCandidate, color_of,
};

/// Loads and persists routes.
///
/// Implement this trait to back the workflow with a concrete store or API.
#[async_trait::async_trait]
pub trait RouteProvider: Send + Sync {
    /// Returns every route persisted so far.
    async fn load_routes(&self) -> Result<Vec<Route>>;

    /// Persists a snapped route and returns it with its assigned id.
    async fn persist_route(&self, request: &NewRoute) -> Result<Route>;
}

/// Snaps a freehand path onto the road network.
#[async_trait::async_trait]
pub trait SnapProvider: Send + Sync {
    /// Returns the road-accurate points for an encoded drawn path.
    ///
    /// The result may hold a different number of points than the input.
    async fn snap_to_road(&self, path: &EncodedPath) -> Result<SnappedPath>;
}

/// Forwards condition votes for later aggregation.
#[async_trait::async_trait]
pub trait VoteProvider: Send + Sync {
    /// Submits a single vote.
    async fn submit_vote(&self, vote: &VoteCandidate) -> Result<()>;
}
