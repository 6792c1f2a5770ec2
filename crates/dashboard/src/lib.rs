//! `logidash-dashboard`
//!
//! **Responsibility:** the logistics manager dashboard as a headless client.
//!
//! This crate provides:
//! - The backend seam (`DashboardSource`) and its HTTP implementation
//! - The fetch orchestrator with all-or-nothing commits and stale-cycle
//!   rejection
//! - The presentation state machine and the view model derived from it
//! - A tokio worker that re-runs the dashboard on session changes
//!
//! The backend remains the authority; nothing fetched here is persisted.

pub mod api;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod routes;
pub mod session;
pub mod state;
pub mod view;
pub mod worker;

pub use api::{ApiError, DashboardSource, HttpDashboardSource};
pub use config::{ConfigError, DashboardConfig};
pub use error::DashboardError;
pub use orchestrator::{Commit, CycleOutcome, DashboardController, FetchCycle};
pub use routes::Route;
pub use session::{Credential, Session};
pub use state::{DashboardSnapshot, DashboardState};
pub use view::DashboardView;
pub use worker::{DashboardHandle, DashboardWorker};
