//! Draw detection logic for tic-tac-toe.

use crate::types::BoardSnapshot;
use tracing::instrument;

/// Checks if the board is full (all cells occupied).
///
/// A full board only counts as a draw once no line wins; see
/// [`evaluate`](super::evaluate).
#[instrument(skip(board))]
pub fn is_full(board: &BoardSnapshot) -> bool {
    board.is_full()
}
