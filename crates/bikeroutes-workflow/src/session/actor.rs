//! The task that owns the machine and runs its effects.

use std::future::Future;
use std::time::Duration;

use bikeroutes_core::{Error, Result, RouteService, SnapService};
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::{JoinError, JoinSet};

use super::{Command, Dispatch, RouteAdded, TRACING_TARGET, WorkflowHandle};
use crate::{
    DrawMachine, Effect, Event, Outcome, Ticket, Transition, WorkflowConfig, WorkflowSnapshot,
};

/// Single-writer owner of a [`DrawMachine`].
///
/// Events are applied in the order they arrive. Collaborator calls run as
/// separate tasks, so attribute changes keep applying while a snap or
/// persist call is outstanding.
pub struct WorkflowSession {
    config: WorkflowConfig,
    machine: DrawMachine,
    routes: RouteService,
    snap: SnapService,
    commands: mpsc::Receiver<Command>,
    state: watch::Sender<WorkflowSnapshot>,
    notifications: broadcast::Sender<RouteAdded>,
    tasks: JoinSet<(Ticket, Outcome)>,
}

impl WorkflowSession {
    /// Spawns a session with a fresh machine on the current tokio runtime.
    ///
    /// The session starts idle; send [`Event::BeginSession`] to load routes.
    pub fn spawn(config: WorkflowConfig, routes: RouteService, snap: SnapService) -> WorkflowHandle {
        Self::spawn_with(config, DrawMachine::new(), routes, snap)
    }

    /// Spawns a session around an existing machine.
    pub fn spawn_with(
        config: WorkflowConfig,
        machine: DrawMachine,
        routes: RouteService,
        snap: SnapService,
    ) -> WorkflowHandle {
        let (command_tx, commands) = mpsc::channel(config.event_buffer.max(1));
        let (state, state_rx) = watch::channel(machine.snapshot());
        let (notifications, _) = broadcast::channel(config.notification_capacity.max(1));
        let handle = WorkflowHandle::new(command_tx, state_rx, notifications.clone());

        let session = Self {
            config,
            machine,
            routes,
            snap,
            commands,
            state,
            notifications,
            tasks: JoinSet::new(),
        };

        tokio::spawn(session.run());
        handle
    }

    async fn run(mut self) {
        tracing::debug!(target: TRACING_TARGET, "Workflow session started");

        loop {
            tokio::select! {
                biased;

                command = self.commands.recv() => match command {
                    Some(Command::Dispatch { event, reply }) => {
                        let dispatch = self.dispatch(event);
                        let _ = reply.send(dispatch);
                    }
                    Some(Command::Shutdown { reply }) => {
                        self.tasks.abort_all();
                        let _ = reply.send(());
                        break;
                    }
                    None => break,
                },
                Some(joined) = self.tasks.join_next(), if !self.tasks.is_empty() => {
                    self.complete(joined);
                }
            }
        }

        self.tasks.abort_all();
        tracing::debug!(
            target: TRACING_TARGET,
            phase = %self.machine.phase(),
            routes = self.machine.existing_routes().len(),
            "Workflow session stopped"
        );
    }

    fn dispatch(&mut self, event: Event) -> Dispatch {
        let transition = self.machine.dispatch(event);
        let dispatch = Dispatch {
            accepted: transition.accepted,
            from: transition.from,
            to: transition.to,
        };
        self.apply(transition);
        dispatch
    }

    fn complete(&mut self, joined: Result<(Ticket, Outcome), JoinError>) {
        let transition = match joined {
            Ok((ticket, outcome)) => self.machine.resolve(ticket, outcome),
            Err(error) if error.is_cancelled() => return,
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    "Collaborator task panicked"
                );
                let error = Error::internal_error()
                    .with_message("collaborator call panicked")
                    .with_source(error);
                self.machine.abort_in_flight(&error)
            }
        };
        self.apply(transition);
    }

    fn apply(&mut self, transition: Transition) {
        if !transition.accepted {
            return;
        }

        if let Some(route) = transition.route_added {
            tracing::info!(
                target: TRACING_TARGET,
                route_id = %route.id,
                condition = %route.condition,
                "Route added"
            );
            // No subscribers is not an error.
            let _ = self.notifications.send(RouteAdded::new(route));
        }

        if let Some(effect) = transition.effect {
            self.execute(effect);
        }

        self.state.send_replace(self.machine.snapshot());
    }

    fn execute(&mut self, effect: Effect) {
        let ticket = effect.ticket();
        tracing::debug!(target: TRACING_TARGET, %ticket, "Running collaborator call");

        match effect {
            Effect::LoadRoutes { .. } => {
                let routes = self.routes.clone();
                let limit = self.config.fetch_timeout;
                self.tasks.spawn(async move {
                    let outcome = within("loading routes", limit, routes.load_routes()).await;
                    (ticket, outcome.map_or_else(Outcome::Failed, Outcome::RoutesLoaded))
                });
            }
            Effect::SnapToRoad { path, .. } => {
                let snap = self.snap.clone();
                let limit = self.config.snap_timeout;
                self.tasks.spawn(async move {
                    let outcome = within("snapping to road", limit, snap.snap_to_road(&path)).await;
                    (ticket, outcome.map_or_else(Outcome::Failed, Outcome::Snapped))
                });
            }
            Effect::PersistRoute {
                points, attributes, ..
            } => {
                let routes = self.routes.clone();
                let limit = self.config.persist_timeout;
                self.tasks.spawn(async move {
                    let call = routes.persist_route(points, attributes);
                    let outcome = within("persisting route", limit, call).await;
                    (ticket, outcome.map_or_else(Outcome::Failed, Outcome::Persisted))
                });
            }
        }
    }
}

async fn within<T>(
    operation: &'static str,
    limit: Duration,
    call: impl Future<Output = Result<T>>,
) -> Result<T> {
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(Error::timeout()
            .with_message(format!("{operation} timed out after {}ms", limit.as_millis()))),
    }
}
