use thiserror::Error;

/// Errors reported by the board engine.
///
/// All of these are caller-input errors: they are reported synchronously, never
/// retried, and leave the engine exactly as it was before the failing call.
/// An illegal move is not an error; it is reported as `Outcome::NoChange`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A configuration value has the wrong shape (bad size, malformed colour, ...).
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    /// A direction token or an imported state could not be understood.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// `move` was called before `start_game`.
    #[error("game has not been started")]
    NotStarted,
}

pub type EngineResult<T> = Result<T, EngineError>;
