//! Vote submission service wrapper.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use super::TRACING_TARGET_VOTE;
use crate::{Result, VoteCandidate, VoteProvider};

/// Vote submission service with structured logging.
#[derive(Clone)]
pub struct VoteService {
    inner: Arc<dyn VoteProvider>,
}

impl fmt::Debug for VoteService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoteService").finish_non_exhaustive()
    }
}

impl VoteService {
    /// Creates a new vote service wrapper.
    pub fn new<P>(provider: P) -> Self
    where
        P: VoteProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Submits a vote.
    pub async fn submit_vote(&self, vote: &VoteCandidate) -> Result<()> {
        let started_at = Instant::now();
        let result = self.inner.submit_vote(vote).await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(()) => {
                tracing::debug!(
                    target: TRACING_TARGET_VOTE,
                    vote_id = %vote.vote_id,
                    route_id = %vote.route_id,
                    condition = %vote.condition,
                    elapsed_ms = elapsed.as_millis(),
                    "Vote submitted"
                );
            }
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET_VOTE,
                    vote_id = %vote.vote_id,
                    route_id = %vote.route_id,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Vote submission failed"
                );
            }
        }

        result
    }
}
