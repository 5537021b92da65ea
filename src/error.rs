//! Error types for the TTSA solver.

use thiserror::Error;

/// Everything that can go wrong while setting up or running a TTSA search.
#[derive(Debug, Error)]
pub enum TtsaError {
    /// A tuning parameter is outside its admissible range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Backtracking exhausted every candidate at the root.
    #[error("no double round robin could be constructed for {teams} teams")]
    ConstructionFailed { teams: usize },

    /// A schedule breaks one of the structural invariants.
    #[error("invalid schedule: {0}")]
    InvalidSchedule(String),

    /// A partial swap chain did not close; the schedule was not a valid pairing.
    #[error("{operator} chain did not close: {detail}")]
    ChainClosure {
        operator: &'static str,
        detail: String,
    },

    /// The distance matrix is not square, has negative entries, etc.
    #[error("malformed distance matrix: {0}")]
    DistanceMatrix(String),

    /// A token in a distance file could not be read as a number.
    #[error("line {line}: cannot parse `{token}` as a distance")]
    Parse { line: usize, token: String },

    /// The configured league size does not match the distance matrix.
    #[error("configuration asks for {config} teams but the distance matrix has {matrix}")]
    TeamCountMismatch { config: usize, matrix: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
