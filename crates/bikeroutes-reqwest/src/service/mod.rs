//! Collaborator trait implementations for [`ApiClient`](crate::ApiClient).
//!
//! Each submodule implements one trait of `bikeroutes-core` on top of the
//! shared client, along with the wire types of its endpoint.

mod routes;
mod snap;
mod vote;

pub use snap::{SnapRequest, SnapResponse, SnappedLocation, SnappedPoint};
pub use vote::VoteRequest;

/// Path of the route collection endpoint.
const ROUTES_PATH: &str = "api/routes";

/// Path of the road snapping proxy.
const SNAP_PATH: &str = "api/google/roads";

/// Path of the vote endpoint.
const VOTES_PATH: &str = "api/votes";
