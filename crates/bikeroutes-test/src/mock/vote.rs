//! Recording vote sink.

use std::sync::{Arc, Mutex};

use bikeroutes_core::{Error, ErrorKind, Result, VoteCandidate, VoteProvider};

use super::lock;

/// Mock vote provider recording accepted votes.
#[derive(Debug, Clone, Default)]
pub struct MockVoteProvider {
    votes: Arc<Mutex<Vec<VoteCandidate>>>,
    failure: Option<ErrorKind>,
}

impl MockVoteProvider {
    /// Creates a provider accepting every vote.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider rejecting every vote with `kind`.
    pub fn failing(kind: ErrorKind) -> Self {
        Self {
            failure: Some(kind),
            ..Self::default()
        }
    }

    /// Returns the accepted votes.
    pub fn votes(&self) -> Vec<VoteCandidate> {
        lock(&self.votes).clone()
    }
}

#[async_trait::async_trait]
impl VoteProvider for MockVoteProvider {
    async fn submit_vote(&self, vote: &VoteCandidate) -> Result<()> {
        if let Some(kind) = self.failure {
            return Err(Error::new(kind).with_message("mock vote sink is failing"));
        }
        lock(&self.votes).push(vote.clone());
        Ok(())
    }
}
