//! Vote submission over `POST /api/votes`.

use bikeroutes_core::{RoadCondition, RouteId, VoteCandidate, VoteProvider};
use serde::{Deserialize, Serialize};

use super::VOTES_PATH;
use crate::connect::{ApiClient, TRACING_TARGET};

/// Body of a vote request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    /// Route voted on.
    pub route_id: RouteId,
    /// Condition picked by the user.
    pub condition: RoadCondition,
}

impl From<&VoteCandidate> for VoteRequest {
    fn from(vote: &VoteCandidate) -> Self {
        Self {
            route_id: vote.route_id,
            condition: vote.condition,
        }
    }
}

#[async_trait::async_trait]
impl VoteProvider for ApiClient {
    async fn submit_vote(&self, vote: &VoteCandidate) -> bikeroutes_core::Result<()> {
        let url = self.endpoint(VOTES_PATH)?;
        tracing::debug!(
            target: TRACING_TARGET,
            url = %url,
            vote_id = %vote.vote_id,
            "Submitting vote"
        );

        self.send(self.http().post(url).json(&VoteRequest::from(vote)))
            .await?;
        Ok(())
    }
}
