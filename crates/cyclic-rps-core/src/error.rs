//! Error taxonomy for sessions, moves, and commitments.

use thiserror::Error;

/// Errors from core game operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Invalid move count {0}: must be an odd number >= 3")]
    InvalidMoveCount(usize),

    #[error("Duplicate move name: {0}")]
    DuplicateMove(String),

    #[error("Invalid move: name must not be empty")]
    InvalidMove,

    #[error("Move name {0:?} is reserved for menu input")]
    ReservedMoveName(String),

    #[error("Unknown move: {0}")]
    UnknownMove(String),

    #[error("Invalid choice {choice}: expected 1..={max}")]
    InvalidChoice { choice: usize, max: usize },

    #[error("Secure entropy unavailable: {0}")]
    EntropyUnavailable(String),

    #[error("Invalid secret key: {0}")]
    InvalidKey(String),

    #[error("Invalid commitment: {0}")]
    InvalidCommitment(String),

    #[error("Commitment mismatch: revealed key and move do not reproduce the published commitment")]
    CommitmentMismatch,
}

impl GameError {
    /// Errors the caller may answer by asking the user again
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GameError::InvalidMoveCount(_)
                | GameError::DuplicateMove(_)
                | GameError::InvalidMove
                | GameError::ReservedMoveName(_)
                | GameError::UnknownMove(_)
                | GameError::InvalidChoice { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
