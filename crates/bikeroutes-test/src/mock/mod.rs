//! Mock implementations of the workflow collaborators.
//!
//! These mocks implement the provider traits defined in bikeroutes-core
//! entirely in memory and are meant for unit and integration tests.

mod routes;
mod snap;
mod vote;

use std::sync::{Mutex, MutexGuard, PoisonError};

use bikeroutes_core::{RouteService, SnapService, VoteService};
pub use routes::MockRouteProvider;
pub use snap::{MockSnapProvider, SnapGate};
pub use vote::MockVoteProvider;

/// Creates services backed by an empty route store, an echoing snapper and
/// a recording vote sink.
pub fn create_mock_services() -> (RouteService, SnapService, VoteService) {
    (
        RouteService::new(MockRouteProvider::new()),
        SnapService::new(MockSnapProvider::echo()),
        VoteService::new(MockVoteProvider::new()),
    )
}

/// Locks shared mock state, ignoring poisoning from a panicked test.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
