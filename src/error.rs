use thiserror::Error;

use crate::solvers::SolveError;

/// Errors surfaced by the `mazetrace` binary.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Solve(#[from] SolveError),

    #[error("failed to install log subscriber: {0}")]
    Logging(String),
}
