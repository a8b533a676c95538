//! Board evaluation: win, draw, or neither.

use super::{draw::is_full, win::check_winner};
use crate::types::{BoardSnapshot, GameStatus, Mark};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Result of evaluating a board snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// No line is complete and at least one cell is empty.
    None,
    /// A mark owns a complete line.
    Win(Mark),
    /// Every cell is occupied and no line is complete.
    Draw,
}

impl From<Outcome> for GameStatus {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::None => GameStatus::InProgress,
            Outcome::Win(mark) => GameStatus::Won(mark),
            Outcome::Draw => GameStatus::Draw,
        }
    }
}

/// Evaluates a snapshot.
///
/// Wins are checked before fullness, so a board that is both full and won
/// reports `Win`, never `Draw`.
#[instrument(skip(board), fields(occupied = board.occupied()))]
pub fn evaluate(board: &BoardSnapshot) -> Outcome {
    if let Some(mark) = check_winner(board) {
        return Outcome::Win(mark);
    }
    if is_full(board) {
        return Outcome::Draw;
    }
    Outcome::None
}
