//! Scriptable road snapper.

use std::sync::{Arc, Mutex};

use bikeroutes_core::{EncodedPath, Error, ErrorKind, Result, SnapProvider, SnappedPath};
use tokio::sync::Semaphore;

use super::lock;

#[derive(Debug, Clone)]
enum Behavior {
    Echo,
    Fixed(SnappedPath),
    Fail(ErrorKind),
    Pending,
}

/// Releases calls held back by a gated [`MockSnapProvider`].
#[derive(Debug, Clone)]
pub struct SnapGate {
    permits: Arc<Semaphore>,
}

impl SnapGate {
    /// Lets one waiting or future call through.
    pub fn open(&self) {
        self.permits.add_permits(1);
    }
}

/// Mock snap provider with a fixed behavior.
#[derive(Debug, Clone)]
pub struct MockSnapProvider {
    behavior: Behavior,
    gate: Option<Arc<Semaphore>>,
    requests: Arc<Mutex<Vec<EncodedPath>>>,
}

impl Default for MockSnapProvider {
    fn default() -> Self {
        Self::echo()
    }
}

impl MockSnapProvider {
    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            gate: None,
            requests: Arc::default(),
        }
    }

    /// Returns the drawn points unchanged.
    pub fn echo() -> Self {
        Self::with_behavior(Behavior::Echo)
    }

    /// Returns `path` for every call.
    pub fn returning(path: SnappedPath) -> Self {
        Self::with_behavior(Behavior::Fixed(path))
    }

    /// Fails every call with `kind`.
    pub fn failing(kind: ErrorKind) -> Self {
        Self::with_behavior(Behavior::Fail(kind))
    }

    /// Never answers.
    pub fn pending() -> Self {
        Self::with_behavior(Behavior::Pending)
    }

    /// Holds every call until the returned gate is opened for it.
    pub fn gated(mut self) -> (Self, SnapGate) {
        let permits = Arc::new(Semaphore::new(0));
        self.gate = Some(permits.clone());
        (self, SnapGate { permits })
    }

    /// Returns every encoded path received.
    pub fn requests(&self) -> Vec<EncodedPath> {
        lock(&self.requests).clone()
    }
}

#[async_trait::async_trait]
impl SnapProvider for MockSnapProvider {
    async fn snap_to_road(&self, path: &EncodedPath) -> Result<SnappedPath> {
        lock(&self.requests).push(path.clone());

        if let Some(gate) = &self.gate {
            let permit = gate.acquire().await.map_err(|error| {
                Error::internal_error()
                    .with_message("snap gate closed")
                    .with_source(error)
            })?;
            permit.forget();
        }

        match &self.behavior {
            Behavior::Echo => Ok(path.decode()?.into_iter().collect()),
            Behavior::Fixed(snapped) => Ok(snapped.clone()),
            Behavior::Fail(kind) => {
                Err(Error::new(*kind).with_message("mock snapper is failing"))
            }
            Behavior::Pending => futures::future::pending().await,
        }
    }
}
