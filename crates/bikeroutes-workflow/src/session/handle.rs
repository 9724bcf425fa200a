//! Cloneable front end of a running session.

use tokio::sync::{broadcast, mpsc, oneshot, watch};

use super::{Command, Dispatch, RouteAdded};
use crate::{Event, WorkflowError, WorkflowResult, WorkflowSnapshot};

/// Handle to a running [`WorkflowSession`](super::WorkflowSession).
///
/// Cheap to clone. The session stops once every handle is dropped or
/// [`shutdown`](Self::shutdown) is called.
#[derive(Debug, Clone)]
pub struct WorkflowHandle {
    commands: mpsc::Sender<Command>,
    state: watch::Receiver<WorkflowSnapshot>,
    notifications: broadcast::Sender<RouteAdded>,
}

impl WorkflowHandle {
    pub(super) fn new(
        commands: mpsc::Sender<Command>,
        state: watch::Receiver<WorkflowSnapshot>,
        notifications: broadcast::Sender<RouteAdded>,
    ) -> Self {
        Self {
            commands,
            state,
            notifications,
        }
    }

    /// Sends an event and waits until the session has applied it.
    pub async fn dispatch(&self, event: Event) -> WorkflowResult<Dispatch> {
        let (reply, receiver) = oneshot::channel();
        self.commands
            .send(Command::Dispatch { event, reply })
            .await
            .map_err(|_| WorkflowError::SessionClosed)?;
        receiver.await.map_err(|_| WorkflowError::SessionClosed)
    }

    /// Returns the latest published state.
    pub fn snapshot(&self) -> WorkflowSnapshot {
        self.state.borrow().clone()
    }

    /// Returns a receiver that observes every published state.
    pub fn watch(&self) -> watch::Receiver<WorkflowSnapshot> {
        self.state.clone()
    }

    /// Waits until the published state satisfies `predicate`.
    ///
    /// Returns immediately if the current state already does.
    pub async fn wait_for<F>(&self, predicate: F) -> WorkflowResult<WorkflowSnapshot>
    where
        F: FnMut(&WorkflowSnapshot) -> bool,
    {
        let mut state = self.state.clone();
        let snapshot = state
            .wait_for(predicate)
            .await
            .map_err(|_| WorkflowError::SessionClosed)?;
        Ok(snapshot.clone())
    }

    /// Subscribes to route notifications.
    ///
    /// Only routes added after the call are delivered.
    pub fn subscribe(&self) -> broadcast::Receiver<RouteAdded> {
        self.notifications.subscribe()
    }

    /// Returns true once the session task has stopped.
    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }

    /// Stops the session, abandoning any collaborator call in flight.
    ///
    /// Succeeds if the session was already stopped.
    pub async fn shutdown(&self) {
        let (reply, receiver) = oneshot::channel();
        if self.commands.send(Command::Shutdown { reply }).await.is_ok() {
            let _ = receiver.await;
        }
    }
}
