//! Monotonic board invariant: cells never change once set.

use super::Invariant;
use crate::state::GameState;
use crate::types::Board;

/// Invariant: board cells are monotonic (never overwritten).
///
/// Replaying the move history onto an empty board must succeed without
/// touching an occupied cell and must reproduce the current board.
pub struct MonotonicBoardInvariant;

impl Invariant<GameState> for MonotonicBoardInvariant {
    fn holds(state: &GameState) -> bool {
        let mut reconstructed = Board::new();
        for mv in state.history() {
            if reconstructed.place(mv.index, mv.marker).is_err() {
                return false;
            }
        }
        reconstructed == *state.board()
    }

    fn description() -> &'static str {
        "Board cells are monotonic (never overwritten)"
    }
}
