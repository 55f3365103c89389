//! Error types for Untangle

use thiserror::Error;

/// Main error type for Untangle operations
#[derive(Debug, Error)]
pub enum UntangleError {
    /// Graph violates the dense-id / valid-endpoint contract
    #[error("Invalid graph: {0}")]
    InvalidGraph(String),

    /// Error in engine configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A search is still outstanding on this worker
    #[error("Solver is busy with an outstanding search")]
    SolverBusy,

    /// The background search ended without reporting a result
    #[error("Search worker terminated without a result")]
    WorkerLost,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Untangle operations
pub type Result<T> = std::result::Result<T, UntangleError>;
