//! Collaborator services with observability.
//!
//! Each service wraps an implementation of one collaborator trait behind an
//! `Arc`, so it can be cloned freely and injected wherever it is needed:
//!
//! - [`RouteService`] wraps a [`RouteProvider`](crate::RouteProvider)
//! - [`SnapService`] wraps a [`SnapProvider`](crate::SnapProvider)
//! - [`VoteService`] wraps a [`VoteProvider`](crate::VoteProvider)

mod routes;
mod snap;
mod vote;

pub use routes::RouteService;
pub use snap::SnapService;
pub use vote::VoteService;

/// Tracing target for route persistence operations.
pub const TRACING_TARGET_ROUTES: &str = "bikeroutes_core::service::routes";

/// Tracing target for road snapping operations.
pub const TRACING_TARGET_SNAP: &str = "bikeroutes_core::service::snap";

/// Tracing target for vote submission.
pub const TRACING_TARGET_VOTE: &str = "bikeroutes_core::service::vote";
