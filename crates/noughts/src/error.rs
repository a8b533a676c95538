//! Error types for the game engine.
//!
//! Move-level errors ([`BoardError`], [`MoveError`]) are recoverable: the
//! controller swallows them and reports "no state change". Setup and agent
//! errors ([`SetupError`], [`AgentError`]) are caller contract violations and
//! are always returned.

use derive_more::{Display, Error};
use tracing::instrument;

/// Error raised by [`Board`](crate::Board) mutation or lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum BoardError {
    /// Index is not in 0-8.
    #[display("Cell index {index} is out of range (0-8)")]
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
    },

    /// The cell already holds a mark.
    #[display("Cell {index} is already occupied")]
    CellOccupied {
        /// The rejected index.
        index: usize,
    },
}

impl std::error::Error for BoardError {}

/// Reason a move intent was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MoveError {
    /// Index is not in 0-8.
    #[display("Cell index {index} is out of range (0-8)")]
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
    },

    /// The cell already holds a mark.
    #[display("Cell {index} is already occupied")]
    CellOccupied {
        /// The rejected index.
        index: usize,
    },

    /// No game is running, or the game is already over.
    #[display("Game is not in progress")]
    GameNotInProgress,

    /// The current player is automated; its move arrives through the scheduler.
    #[display("Waiting for the automated player to move")]
    AwaitingAgent,
}

impl std::error::Error for MoveError {}

impl From<BoardError> for MoveError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::IndexOutOfRange { index } => MoveError::IndexOutOfRange { index },
            BoardError::CellOccupied { index } => MoveError::CellOccupied { index },
        }
    }
}

/// Error starting or restarting a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SetupError {
    /// A game needs exactly two players.
    #[display("A game requires exactly 2 players, got {count}")]
    InvalidPlayerCount {
        /// Number of player specs supplied.
        count: usize,
    },

    /// `play_again` was called before any game was started.
    #[display("No players configured; start a game first")]
    NoPlayers,
}

impl std::error::Error for SetupError {}

/// Error raised by an automated agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum AgentError {
    /// The board has no empty cell to choose from.
    #[display("No available move: the board is full")]
    NoAvailableMove,

    /// The policy picked a cell the board refused.
    #[display("Agent chose illegal cell {index}")]
    IllegalMove {
        /// The rejected index.
        index: usize,
    },
}

impl std::error::Error for AgentError {}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_error_converts_to_move_error() {
        assert_eq!(
            MoveError::from(BoardError::CellOccupied { index: 4 }),
            MoveError::CellOccupied { index: 4 }
        );
        assert_eq!(
            MoveError::from(BoardError::IndexOutOfRange { index: 12 }),
            MoveError::IndexOutOfRange { index: 12 }
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            SetupError::InvalidPlayerCount { count: 3 }.to_string(),
            "A game requires exactly 2 players, got 3"
        );
        assert_eq!(AgentError::IllegalMove { index: 4 }.to_string(), "Agent chose illegal cell 4");
        assert!(ConfigError::new("bad").to_string().starts_with("Config error: bad at "));
    }
}
