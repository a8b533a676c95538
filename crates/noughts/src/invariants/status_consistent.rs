//! Status consistency invariant: the stored status matches the board.

use super::Invariant;
use crate::rules;
use crate::state::GameState;
use crate::types::GameStatus;

/// Invariant: status equals what the rules say about the board.
pub struct StatusConsistentInvariant;

impl Invariant<GameState> for StatusConsistentInvariant {
    fn holds(state: &GameState) -> bool {
        GameStatus::from(rules::evaluate(&state.snapshot())) == *state.status()
    }

    fn description() -> &'static str {
        "Status matches board evaluation"
    }
}
