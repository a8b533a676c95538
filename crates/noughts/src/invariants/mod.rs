//! First-class invariants for a game in play.
//!
//! Invariants are logical properties that must hold after every accepted
//! move. The controller checks them in debug builds; tests check them
//! directly.

use crate::state::GameState;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn check<S, I: Invariant<S>>(state: &S, violations: &mut Vec<InvariantViolation>) {
    if !I::holds(state) {
        violations.push(InvariantViolation::new(I::description()));
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check::<S, I1>(state, &mut violations);
        check::<S, I2>(state, &mut violations);
        check::<S, I3>(state, &mut violations);
        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check::<S, I1>(state, &mut violations);
        check::<S, I2>(state, &mut violations);
        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }
}

pub mod alternating_turn;
pub mod monotonic_board;
pub mod status_consistent;

pub use alternating_turn::AlternatingTurnInvariant;
pub use monotonic_board::MonotonicBoardInvariant;
pub use status_consistent::StatusConsistentInvariant;

/// All game invariants as a composable set.
pub type GameInvariants = (
    MonotonicBoardInvariant,
    AlternatingTurnInvariant,
    StatusConsistentInvariant,
);

/// Panics in debug builds if any game invariant is violated.
pub(crate) fn debug_assert_invariants(state: &GameState) {
    if cfg!(debug_assertions) {
        if let Err(violations) = GameInvariants::check_all(state) {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            tracing::error!(%descriptions, "Game invariant violated");
            panic!("Game invariant violated: {}", descriptions);
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::player::{Player, PlayerSpec};
    use crate::rules;
    use crate::state::GameState;
    use crate::types::{Mark, Move};

    /// Builds a state by playing `indices` alternately from X.
    pub fn played(indices: &[usize]) -> GameState {
        let mut state = GameState::new([
            Player::from_spec(PlayerSpec::human("Alice"), Mark::X),
            Player::from_spec(PlayerSpec::human("Bob"), Mark::O),
        ]);
        for (n, &index) in indices.iter().enumerate() {
            let marker = Mark::for_seat(n);
            state.board.place(index, marker).unwrap();
            state.history.push(Move::new(marker, index));
            state.current_player_index = 1 - state.current_player_index;
            state.status = rules::evaluate(&state.board.snapshot()).into();
        }
        state
    }
}
