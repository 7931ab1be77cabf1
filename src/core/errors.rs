/*!
 * Error Types
 * Centralized error handling with thiserror and miette diagnostics
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Simulation operation result
pub type SimResult<T> = Result<T, SimError>;

/// Errors surfaced by the simulation engines and the command layer
///
/// Resource contention (a failed fork pick-up) is never an error; it is
/// retried inside the synchronization engine.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SimError {
    #[error("Invalid {name}: {value}")]
    #[diagnostic(
        code(sim::invalid_argument),
        help("Pass a whole number, e.g. `roundrobin 5 2`.")
    )]
    InvalidArgument { name: String, value: String },

    #[error("Unknown command: {0}")]
    #[diagnostic(
        code(sim::unknown_command),
        help("Available commands: roundrobin, priority, paging, philosophers.")
    )]
    UnknownCommand(String),

    #[error("Output error: {0}")]
    #[diagnostic(
        code(sim::io_error),
        help("The report sink rejected a write. Check that stdout is still open.")
    )]
    Io(String),

    #[error("Invalid memory reference: {0}")]
    #[diagnostic(
        code(sim::invalid_reference),
        help("References must name an existing process and one of its pages.")
    )]
    InvalidReference(String),

    #[error("Internal error: {0}")]
    #[diagnostic(
        code(sim::internal_error),
        help("An engine invariant was violated. Please report this issue.")
    )]
    Internal(String),

    #[error("Philosopher {0} panicked")]
    #[diagnostic(
        code(sim::actor_panicked),
        help("An actor thread died mid-run. Its forks were released by their guards.")
    )]
    ActorPanicked(usize),
}

impl SimError {
    pub fn invalid_argument(name: &str, value: &str) -> Self {
        SimError::InvalidArgument {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

impl From<std::io::Error> for SimError {
    fn from(err: std::io::Error) -> Self {
        SimError::Io(err.to_string())
    }
}
