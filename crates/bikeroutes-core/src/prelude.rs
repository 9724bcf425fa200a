//! Convenience re-exports for collaborator implementations.

pub use crate::error::{BoxedError, Error, ErrorKind, Result};
pub use crate::service::{RouteService, SnapService, VoteService};
pub use crate::types::{
    DrawnPath, EncodedPath, LatLng, NewRoute, RoadAttributes, RoadCondition, RoadSurface,
    RoadType, Route, RouteId, SnappedPath, VoteCandidate,
};
pub use crate::{RouteProvider, SnapProvider, VoteProvider};
