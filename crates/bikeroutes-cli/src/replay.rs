//! Replays drawn paths through a workflow session.

use anyhow::{Context, bail};
use bikeroutes_core::{DrawnPath, RoadAttributes};
use bikeroutes_workflow::{Event, Phase, RouteAdded, WorkflowHandle, WorkflowSnapshot};
use tokio::sync::broadcast::error::TryRecvError;

use crate::TRACING_TARGET_REPLAY;

/// What a replay did.
#[derive(Debug, Default)]
pub struct ReplaySummary {
    /// Paths that went through a full snap and persist cycle.
    pub replayed: usize,
    /// Empty paths that were not sent.
    pub skipped: usize,
    /// Routes added during the replay, in order.
    pub added: Vec<RouteAdded>,
    /// Routes known to the session at the end.
    pub total_routes: usize,
}

/// Loads existing routes, then draws every path in order.
///
/// Stops at the first path that leaves the session in the error phase.
pub async fn replay(
    handle: &WorkflowHandle,
    attributes: RoadAttributes,
    paths: Vec<DrawnPath>,
) -> anyhow::Result<ReplaySummary> {
    let mut notifications = handle.subscribe();
    let mut summary = ReplaySummary::default();

    for event in [
        Event::SetRoadType(attributes.road_type),
        Event::SetRoadSurface(attributes.surface),
        Event::SetRoadCondition(attributes.condition),
        Event::BeginSession,
    ] {
        handle.dispatch(event).await?;
    }

    let state = settle(handle).await?;
    ensure_drawing(&state).context("failed to load existing routes")?;
    tracing::info!(
        target: TRACING_TARGET_REPLAY,
        existing_routes = state.existing_routes.len(),
        paths = paths.len(),
        "existing routes loaded"
    );

    for (index, path) in paths.into_iter().enumerate() {
        if path.is_empty() {
            tracing::warn!(target: TRACING_TARGET_REPLAY, index, "skipping empty path");
            summary.skipped += 1;
            continue;
        }

        let points = path.len();
        let dispatch = handle.dispatch(Event::PathDrawn(path)).await?;
        if !dispatch.accepted {
            bail!("path {index} was not accepted in the {} phase", dispatch.from);
        }

        let state = settle(handle).await?;
        ensure_drawing(&state).with_context(|| format!("failed to replay path {index}"))?;

        loop {
            match notifications.try_recv() {
                Ok(added) => {
                    tracing::info!(
                        target: TRACING_TARGET_REPLAY,
                        index,
                        drawn_points = points,
                        route_id = %added.route.id,
                        snapped_points = added.route.points.len(),
                        color = added.color.hex(),
                        "route added"
                    );
                    summary.added.push(added);
                }
                Err(TryRecvError::Lagged(missed)) => {
                    tracing::warn!(
                        target: TRACING_TARGET_REPLAY,
                        missed,
                        "route notifications lagged"
                    );
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }

        summary.replayed += 1;
    }

    summary.total_routes = handle.snapshot().existing_routes.len();
    Ok(summary)
}

/// Waits until no collaborator call is outstanding.
async fn settle(handle: &WorkflowHandle) -> anyhow::Result<WorkflowSnapshot> {
    Ok(handle.wait_for(|state| !state.phase.is_busy()).await?)
}

fn ensure_drawing(state: &WorkflowSnapshot) -> anyhow::Result<()> {
    match (&state.last_error, state.phase) {
        (Some(failure), Phase::Error) => bail!(
            "{} ({}): {}",
            failure.kind,
            failure.cause,
            failure.message
        ),
        (_, Phase::Drawing) => Ok(()),
        (_, phase) => bail!("session settled in the {phase} phase"),
    }
}
