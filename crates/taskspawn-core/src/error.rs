//! Error types for TaskSpawn Core

use thiserror::Error;

/// Result type alias using TaskSpawn Error
pub type Result<T> = std::result::Result<T, Error>;

/// TaskSpawn error types
#[derive(Error, Debug)]
pub enum Error {
    /// Failure inside the external engine. Surfaced to the caller exactly as
    /// the engine raised it.
    #[error("Engine error: {0}")]
    Engine(String),

    /// The engine rejected a task state transition (e.g. cancelling a task
    /// that already finished).
    #[error("Invalid task transition: {0}")]
    InvalidTransition(String),

    /// A hook handle was invoked after the slot owning it released it.
    #[error("Hook handle has been released")]
    HookReleased,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
