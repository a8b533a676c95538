//! Notifications published by the controller.
//!
//! Displays subscribe with
//! [`GameController::subscribe`](crate::GameController::subscribe) and
//! render from these events; the core never calls into a renderer.

use crate::state::{GameResult, Scoreboard};
use crate::types::{BoardSnapshot, Mark, Move};

/// A seated player as seen by a display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatInfo {
    /// Player's name.
    pub name: String,
    /// Player's mark.
    pub marker: Mark,
    /// Whether an agent plays this seat.
    pub automated: bool,
}

/// Messages sent from the controller to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A game (or a rematch) began on a cleared board.
    GameStarted {
        /// Seats 0 and 1.
        players: [SeatInfo; 2],
    },
    /// A move was accepted.
    MovePlayed {
        /// The move.
        mv: Move,
        /// Board after the move.
        snapshot: BoardSnapshot,
    },
    /// An automated player's move has been scheduled.
    AgentThinking {
        /// Player's name.
        name: String,
        /// Player's mark.
        marker: Mark,
    },
    /// The game reached a terminal status.
    GameOver {
        /// How it ended.
        result: GameResult,
        /// Final board.
        snapshot: BoardSnapshot,
        /// Completed line for a win.
        line: Option<[usize; 3]>,
        /// Tally including this game.
        scoreboard: Scoreboard,
    },
    /// Players were discarded; the controller is back in setup.
    Reset,
}
