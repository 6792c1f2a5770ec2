//! Background worker that keeps a dashboard current.

use std::sync::Arc;

use tokio::sync::{Notify, mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::api::DashboardSource;
use crate::orchestrator::{Commit, CycleOutcome, DashboardController, FetchCycle};
use crate::session::Session;
use crate::state::DashboardState;

/// Drives a [`DashboardController`] from session changes and refresh requests.
pub struct DashboardWorker<S> {
    source: Arc<S>,
    sessions: watch::Receiver<Session>,
    refresh_rx: mpsc::Receiver<oneshot::Sender<()>>,
    shutdown: Arc<Notify>,
    state_tx: watch::Sender<DashboardState>,
    controller: DashboardController,
}

/// Caller's side of a running [`DashboardWorker`].
///
/// Dropping the handle stops the worker.
pub struct DashboardHandle {
    state: watch::Receiver<DashboardState>,
    refresh_tx: mpsc::Sender<oneshot::Sender<()>>,
    shutdown: Arc<Notify>,
    task: JoinHandle<()>,
}

impl<S> DashboardWorker<S>
where
    S: DashboardSource + 'static,
{
    /// Start the worker on the current tokio runtime.
    ///
    /// The worker:
    /// - Fetches once for the session current at spawn time
    /// - Fetches again whenever the session's credential changes
    /// - Fetches again on every [`DashboardHandle::refresh`]
    /// - Aborts a superseded in-flight fetch before starting the next one
    /// - Stops on shutdown or when the handle is dropped
    /// - Stops once the session sender is dropped, after letting an
    ///   in-flight fetch settle
    pub fn spawn(source: Arc<S>, sessions: watch::Receiver<Session>) -> DashboardHandle {
        let (state_tx, state_rx) = watch::channel(DashboardState::initial());
        let (refresh_tx, refresh_rx) = mpsc::channel(8);
        let shutdown = Arc::new(Notify::new());

        let worker = Self {
            source,
            sessions,
            refresh_rx,
            shutdown: shutdown.clone(),
            state_tx,
            controller: DashboardController::new(),
        };

        let task = tokio::spawn(worker.run());

        DashboardHandle {
            state: state_rx,
            refresh_tx,
            shutdown,
            task,
        }
    }

    async fn run(mut self) {
        tracing::info!("Dashboard worker started");

        let (done_tx, mut done_rx) = mpsc::channel::<CycleOutcome>(4);
        let mut in_flight: Option<JoinHandle<()>> = None;

        let initial = self.sessions.borrow_and_update().clone();
        if let Some(cycle) = self.controller.on_session(&initial) {
            self.launch(cycle, &done_tx, &mut in_flight);
        }

        let mut sessions_open = true;

        loop {
            tokio::select! {
                _ = self.shutdown.notified() => {
                    tracing::info!("Dashboard worker received shutdown signal");
                    break;
                }
                changed = self.sessions.changed(), if sessions_open => {
                    if changed.is_err() {
                        sessions_open = false;
                        if !self.controller.state().is_loading() {
                            tracing::info!("Session provider closed; stopping dashboard worker");
                            break;
                        }
                        tracing::info!("Session provider closed; waiting for in-flight fetch");
                        continue;
                    }
                    let session = self.sessions.borrow_and_update().clone();
                    if let Some(cycle) = self.controller.on_session(&session) {
                        self.launch(cycle, &done_tx, &mut in_flight);
                    }
                }
                Some(ack) = self.refresh_rx.recv() => {
                    let cycle = self.controller.refresh();
                    self.launch(cycle, &done_tx, &mut in_flight);
                    // Loading is published; the caller may now wait on it.
                    let _ = ack.send(());
                }
                Some(outcome) = done_rx.recv() => {
                    if self.controller.complete(outcome) == Commit::Applied {
                        self.publish();
                    }
                    if !sessions_open && !self.controller.state().is_loading() {
                        tracing::info!("In-flight fetch settled; stopping dashboard worker");
                        break;
                    }
                }
            }
        }

        if let Some(task) = in_flight.take() {
            task.abort();
        }

        tracing::info!("Dashboard worker stopped");
    }

    fn launch(
        &mut self,
        cycle: FetchCycle,
        done_tx: &mpsc::Sender<CycleOutcome>,
        in_flight: &mut Option<JoinHandle<()>>,
    ) {
        if let Some(previous) = in_flight.take() {
            // No-op when the previous cycle already finished.
            previous.abort();
        }

        self.publish();

        let source = self.source.clone();
        let done_tx = done_tx.clone();
        *in_flight = Some(tokio::spawn(async move {
            let outcome = cycle.run(source.as_ref()).await;
            let _ = done_tx.send(outcome).await;
        }));
    }

    fn publish(&self) {
        self.state_tx.send_replace(self.controller.state().clone());
    }
}

impl DashboardHandle {
    /// Current state.
    pub fn state(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    /// A receiver that observes every published state.
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state.clone()
    }

    /// Ask the worker to re-fetch with the current credential.
    ///
    /// Resolves once the new cycle has started and `Loading` is published, so
    /// a following [`settled`](Self::settled) observes that cycle's outcome.
    /// Returns `false` if the worker has stopped.
    pub async fn refresh(&self) -> bool {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.refresh_tx.send(ack_tx).await.is_err() {
            return false;
        }
        ack_rx.await.is_ok()
    }

    /// Wait until the published state satisfies `predicate`.
    ///
    /// Returns `None` if the worker stopped first.
    pub async fn wait_for(
        &mut self,
        mut predicate: impl FnMut(&DashboardState) -> bool,
    ) -> Option<DashboardState> {
        self.state
            .wait_for(|state| predicate(state))
            .await
            .ok()
            .map(|state| state.clone())
    }

    /// Wait until the current cycle settles into `Ready` or `Error`.
    ///
    /// If the worker was shut down mid-cycle this returns the last published
    /// state, which is then still `Loading`.
    pub async fn settled(&mut self) -> DashboardState {
        match self.wait_for(|state| !state.is_loading()).await {
            Some(state) => state,
            None => self.state(),
        }
    }

    /// Stop the worker and wait for it to exit.
    pub async fn shutdown(mut self) {
        self.shutdown.notify_one();
        let _ = (&mut self.task).await;
    }

    /// Wait for the worker to exit on its own.
    pub async fn join(mut self) {
        let _ = (&mut self.task).await;
    }
}

impl Drop for DashboardHandle {
    fn drop(&mut self) {
        // Stores a permit if the loop is not currently waiting.
        self.shutdown.notify_one();
    }
}
