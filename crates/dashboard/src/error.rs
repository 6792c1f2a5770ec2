//! User-facing dashboard errors.

use thiserror::Error;

/// The only failure the presentation layer ever sees.
///
/// Technical detail (status codes, decode errors) is logged where the
/// failure happens and never carried into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DashboardError {
    /// Either backend read failed (network, non-success status, or decode).
    #[error("Failed to load dashboard data. Please try again later.")]
    FetchFailed,
}
