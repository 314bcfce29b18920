//! Benchmark setup error type.
//!
//! Aggregates the errors that may arise while preparing benchmark graphs
//! so that setup functions can propagate failures with `?` instead of
//! using `.expect()`.

use crate::synthetic::SyntheticError;
use leafspan_core::GraphError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BenchSetupError {
    /// Synthetic graph generation failed.
    #[error("synthetic graph generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// Grid construction failed.
    #[error("graph construction failed: {0}")]
    Graph(#[from] GraphError),
}
