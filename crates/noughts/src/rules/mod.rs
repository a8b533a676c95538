//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`BoardSnapshot`](crate::BoardSnapshot). Rules are
//! kept apart from board storage so the controller, invariants and tests
//! all share one definition of "won" and "drawn".

pub mod draw;
pub mod outcome;
pub mod win;

pub use draw::is_full;
pub use outcome::{Outcome, evaluate};
pub use win::{WINNING_LINES, check_winner, winning_line};
