//! Automated move selection.

use crate::error::AgentError;
use crate::types::BoardSnapshot;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use tracing::{debug, instrument};

/// Capability of an automated player: pick a cell to play.
pub trait MovePolicy: std::fmt::Debug + Send {
    /// Chooses an empty cell index on `board`.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::NoAvailableMove`] when the board is full.
    fn choose_move(&mut self, board: &BoardSnapshot) -> Result<usize, AgentError>;

    /// Short policy name for logs.
    fn name(&self) -> &'static str;
}

/// Picks uniformly among the empty cells.
///
/// The empty set is enumerated first and sampled once, so every call does
/// a bounded amount of work no matter how full the board is.
#[derive(Debug)]
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    /// Creates a policy seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a deterministic policy.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl MovePolicy for RandomPolicy {
    fn choose_move(&mut self, board: &BoardSnapshot) -> Result<usize, AgentError> {
        let empty = board.empty_indices();
        empty
            .choose(&mut self.rng)
            .copied()
            .ok_or(AgentError::NoAvailableMove)
    }

    fn name(&self) -> &'static str {
        "uniform_random"
    }
}

/// The automated half of a [`PlayerKind`](crate::PlayerKind).
#[derive(Debug)]
pub struct AutomatedAgent {
    policy: Box<dyn MovePolicy>,
}

impl AutomatedAgent {
    /// Wraps a move policy.
    pub fn new(policy: impl MovePolicy + 'static) -> Self {
        Self {
            policy: Box::new(policy),
        }
    }

    /// Agent picking uniformly at random, seeded if `seed` is given.
    pub fn random(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::new(RandomPolicy::seeded(seed)),
            None => Self::new(RandomPolicy::new()),
        }
    }

    /// Selects a move from the current empty cells.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::NoAvailableMove`] if no cell is empty.
    #[instrument(skip(self, board), fields(policy = self.policy.name()))]
    pub fn choose_move(&mut self, board: &BoardSnapshot) -> Result<usize, AgentError> {
        let index = self.policy.choose_move(board)?;
        debug!(index, "Agent chose cell");
        Ok(index)
    }

    /// Name of the underlying policy.
    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Board, Mark};

    fn board_except(open: &[usize]) -> BoardSnapshot {
        let mut board = Board::new();
        for index in (0..9).filter(|i| !open.contains(i)) {
            board.place(index, Mark::for_seat(index)).unwrap();
        }
        board.snapshot()
    }

    #[test]
    fn test_single_empty_cell_is_always_chosen() {
        for open in 0..9 {
            let board = board_except(&[open]);
            let mut agent = AutomatedAgent::random(Some(open as u64));
            for _ in 0..20 {
                assert_eq!(agent.choose_move(&board), Ok(open));
            }
        }
    }

    #[test]
    fn test_full_board_has_no_move() {
        let board = board_except(&[]);
        let mut agent = AutomatedAgent::random(None);
        assert_eq!(agent.choose_move(&board), Err(AgentError::NoAvailableMove));
    }

    #[test]
    fn test_choice_is_always_empty() {
        let board = board_except(&[1, 5, 6]);
        let mut agent = AutomatedAgent::random(Some(7));
        for _ in 0..100 {
            let index = agent.choose_move(&board).unwrap();
            assert!([1, 5, 6].contains(&index));
        }
    }

    #[test]
    fn test_every_empty_cell_gets_picked() {
        let board = BoardSnapshot::default();
        let mut policy = RandomPolicy::seeded(42);
        let mut seen = [false; 9];
        for _ in 0..500 {
            seen[policy.choose_move(&board).unwrap()] = true;
        }
        assert!(seen.iter().all(|&hit| hit));
    }

    #[test]
    fn test_seeded_policy_is_deterministic() {
        let board = BoardSnapshot::default();
        let mut a = RandomPolicy::seeded(3);
        let mut b = RandomPolicy::seeded(3);
        for _ in 0..10 {
            assert_eq!(a.choose_move(&board), b.choose_move(&board));
        }
    }
}
