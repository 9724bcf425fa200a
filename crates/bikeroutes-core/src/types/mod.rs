//! Value types shared by the workflow and its collaborators.

mod coordinate;
mod road;
mod route;
mod vote;

pub use coordinate::{
    COMPONENT_SEPARATOR, DrawnPath, EncodedPath, INITIAL_CENTER, INITIAL_ZOOM, LatLng,
    PAIR_SEPARATOR, SnappedPath, URL_VALUE_PRECISION,
};
pub use road::{RoadAttributes, RoadCondition, RoadSurface, RoadType, RouteColor, color_of};
pub use route::{NewRoute, Polyline, Route, RouteId};
pub use vote::VoteCandidate;
