//! Alternating turn invariant: X, O, X, O, ...

use super::Invariant;
use crate::state::GameState;
use crate::types::Mark;

/// Invariant: players alternate turns, X first.
///
/// The n-th move carries the mark of seat `n mod 2`, and after `n` moves
/// the current seat is `n mod 2`.
pub struct AlternatingTurnInvariant;

impl Invariant<GameState> for AlternatingTurnInvariant {
    fn holds(state: &GameState) -> bool {
        let history = state.history();
        let x_first = history.first().is_none_or(|mv| mv.marker == Mark::X);
        let alternates = history
            .windows(2)
            .all(|pair| pair[1].marker == pair[0].marker.opponent());
        x_first && alternates && *state.current_player_index() == history.len() % 2
    }

    fn description() -> &'static str {
        "Players alternate turns (X, O, X, O, ...)"
    }
}
