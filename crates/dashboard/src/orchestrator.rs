//! Fetch orchestration: one cycle reads both collections and commits them
//! together, or not at all.
//!
//! Every cycle carries the generation it was started with. Only the outcome
//! of the latest generation may commit; anything older is discarded, so a
//! slow response for a previous credential can never overwrite newer state.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::api::DashboardSource;
use crate::error::DashboardError;
use crate::session::{Credential, Session};
use crate::state::{DashboardSnapshot, DashboardState};

/// A triggered fetch cycle, ready to run against a source.
#[derive(Debug, Clone)]
pub struct FetchCycle {
    generation: u64,
    cycle_id: Uuid,
    credential: Option<Credential>,
}

/// Result of running a [`FetchCycle`], to be handed back to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleOutcome {
    generation: u64,
    cycle_id: Uuid,
    result: Result<DashboardSnapshot, DashboardError>,
}

/// What [`DashboardController::complete`] did with an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    /// The outcome became the new state.
    Applied,
    /// The outcome belonged to a superseded or already-settled cycle.
    Stale,
}

impl FetchCycle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cycle_id(&self) -> Uuid {
        self.cycle_id
    }

    /// Issue both reads concurrently and wait for both.
    ///
    /// Failures are logged with their detail here and reduced to
    /// [`DashboardError::FetchFailed`].
    pub async fn run<S: DashboardSource>(self, source: &S) -> CycleOutcome {
        tracing::info!(
            "Fetch cycle {} (generation {}) started",
            self.cycle_id,
            self.generation
        );

        let credential = self.credential.as_ref();
        let (warehouses, inventory) = tokio::join!(
            source.fetch_warehouses(credential),
            source.fetch_inventory(credential),
        );

        let result = match (warehouses, inventory) {
            (Ok(warehouses), Ok(inventory)) => {
                Ok(DashboardSnapshot::new(warehouses, inventory, Utc::now()))
            }
            (warehouses, inventory) => {
                if let Err(e) = &warehouses {
                    tracing::error!("Error fetching warehouses in cycle {}: {}", self.cycle_id, e);
                }
                if let Err(e) = &inventory {
                    tracing::error!("Error fetching inventory in cycle {}: {}", self.cycle_id, e);
                }
                Err(DashboardError::FetchFailed)
            }
        };

        CycleOutcome {
            generation: self.generation,
            cycle_id: self.cycle_id,
            result,
        }
    }
}

impl CycleOutcome {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cycle_id(&self) -> Uuid {
        self.cycle_id
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Owns the dashboard state and sequences fetch cycles into it.
#[derive(Debug, Default)]
pub struct DashboardController {
    generation: u64,
    /// Last credential a cycle was triggered for; `None` until the first trigger.
    credential: Option<Option<Credential>>,
    state: DashboardState,
}

impl DashboardController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Generation of the most recently triggered cycle (0 before any).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// React to the current session.
    ///
    /// Starts a cycle only when the credential differs from the one the last
    /// cycle was triggered for; an unchanged session returns `None`.
    pub fn on_session(&mut self, session: &Session) -> Option<FetchCycle> {
        let token = session.token().cloned();
        if self.credential.as_ref() == Some(&token) {
            tracing::debug!("Session unchanged; keeping current dashboard state");
            return None;
        }

        self.credential = Some(token.clone());
        Some(self.begin(token))
    }

    /// Start a new cycle with the current credential (explicit user refresh).
    pub fn refresh(&mut self) -> FetchCycle {
        let token = self.credential.clone().flatten();
        self.begin(token)
    }

    fn begin(&mut self, credential: Option<Credential>) -> FetchCycle {
        self.generation += 1;
        self.state = DashboardState::Loading {
            retained: self.state.retained(),
        };

        FetchCycle {
            generation: self.generation,
            cycle_id: Uuid::now_v7(),
            credential,
        }
    }

    /// Commit a finished cycle if it is still the current one.
    pub fn complete(&mut self, outcome: CycleOutcome) -> Commit {
        if outcome.generation != self.generation || !self.state.is_loading() {
            tracing::warn!(
                "Discarding outcome of cycle {} (generation {}, current {})",
                outcome.cycle_id,
                outcome.generation,
                self.generation
            );
            return Commit::Stale;
        }

        self.state = match outcome.result {
            Ok(snapshot) => {
                tracing::info!(
                    "Cycle {} committed: {} warehouses, {} inventory items, {} low stock",
                    outcome.cycle_id,
                    snapshot.stats().total_warehouses,
                    snapshot.stats().total_inventory,
                    snapshot.stats().low_stock_items
                );
                DashboardState::Ready(Arc::new(snapshot))
            }
            Err(err) => DashboardState::Error {
                message: err.to_string(),
                retained: self.state.retained(),
            },
        };

        Commit::Applied
    }

    /// Trigger for `session`, run the cycle to completion and commit it.
    ///
    /// Returns `None` when the session did not change.
    pub async fn load<S: DashboardSource>(&mut self, source: &S, session: &Session) -> Option<Commit> {
        let cycle = self.on_session(session)?;
        let outcome = cycle.run(source).await;
        Some(self.complete(outcome))
    }
}
