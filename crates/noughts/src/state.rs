//! Game state owned by the controller, plus the phase and result views
//! handed to displays.

use crate::player::Player;
use crate::types::{Board, BoardSnapshot, GameStatus, Mark, Move};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// State of one game instance.
///
/// Only [`GameController`](crate::GameController) mutates it; everyone else
/// sees it through shared references or snapshots.
#[derive(Debug, Getters)]
pub struct GameState {
    /// The board.
    pub(crate) board: Board,
    /// Seats 0 and 1, holding X and O.
    pub(crate) players: [Player; 2],
    /// Seat whose turn it is.
    pub(crate) current_player_index: usize,
    /// Game status.
    pub(crate) status: GameStatus,
    /// Accepted moves in order.
    pub(crate) history: Vec<Move>,
}

impl GameState {
    pub(crate) fn new(players: [Player; 2]) -> Self {
        Self {
            board: Board::new(),
            players,
            current_player_index: 0,
            status: GameStatus::InProgress,
            history: Vec::new(),
        }
    }

    /// Clears the board and history, keeping the players.
    pub(crate) fn restart(&mut self) {
        self.board.reset();
        self.current_player_index = 0;
        self.status = GameStatus::InProgress;
        self.history.clear();
    }

    /// The player whose turn it is.
    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player_index]
    }

    /// The player holding `mark`.
    pub fn player_with(&self, mark: Mark) -> &Player {
        &self.players[if mark == Mark::X { 0 } else { 1 }]
    }

    /// Copy of the board.
    pub fn snapshot(&self) -> BoardSnapshot {
        self.board.snapshot()
    }

    /// Result classification once the game is over.
    pub fn result(&self) -> Option<GameResult> {
        match self.status {
            GameStatus::InProgress => None,
            GameStatus::Won(marker) => Some(GameResult::Win {
                marker,
                winner: self.player_with(marker).display_name().clone(),
            }),
            GameStatus::Draw => Some(GameResult::Draw),
        }
    }
}

/// How a finished game ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// A player completed a line.
    Win {
        /// Winning mark.
        marker: Mark,
        /// Display name of the winning player.
        winner: String,
    },
    /// Board filled with no winner.
    Draw,
}

impl GameResult {
    /// Returns the winning mark if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            GameResult::Win { marker, .. } => Some(*marker),
            GameResult::Draw => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, GameResult::Draw)
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Win { marker, winner } => write!(f, "{} ({}) wins", winner, marker),
            GameResult::Draw => write!(f, "Draw"),
        }
    }
}

/// Where the controller is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// No players; waiting for `start_game`.
    Setup,
    /// Moves are being accepted.
    InProgress,
    /// Game over; waiting for `play_again` or `reset_game`.
    Finished(GameResult),
}

/// Results tallied across `play_again` rounds with the same players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Games won by X.
    pub x_wins: u32,
    /// Games won by O.
    pub o_wins: u32,
    /// Drawn games.
    pub draws: u32,
}

impl Scoreboard {
    /// Counts a finished game. In-progress statuses are ignored.
    pub fn record(&mut self, status: GameStatus) {
        match status {
            GameStatus::Won(Mark::X) => self.x_wins += 1,
            GameStatus::Won(Mark::O) => self.o_wins += 1,
            GameStatus::Draw => self.draws += 1,
            GameStatus::InProgress => {}
        }
    }

    /// Total finished games.
    pub fn games(&self) -> u32 {
        self.x_wins + self.o_wins + self.draws
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerSpec;

    fn state() -> GameState {
        GameState::new([
            Player::from_spec(PlayerSpec::human("Alice"), Mark::X),
            Player::from_spec(PlayerSpec::human("Bob"), Mark::O),
        ])
    }

    #[test]
    fn test_result_names_winner() {
        let mut game = state();
        game.status = GameStatus::Won(Mark::O);
        let result = game.result().unwrap();
        assert_eq!(result.winner(), Some(Mark::O));
        assert_eq!(result.to_string(), "Bob (O) wins");
    }

    #[test]
    fn test_restart_keeps_players() {
        let mut game = state();
        game.board.place(0, Mark::X).unwrap();
        game.history.push(Move::new(Mark::X, 0));
        game.current_player_index = 1;
        game.status = GameStatus::Draw;
        game.restart();
        assert_eq!(game.snapshot(), BoardSnapshot::default());
        assert_eq!(game.current_player().display_name(), "Alice");
        assert_eq!(*game.status(), GameStatus::InProgress);
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_scoreboard_records() {
        let mut board = Scoreboard::default();
        board.record(GameStatus::Won(Mark::X));
        board.record(GameStatus::Draw);
        board.record(GameStatus::InProgress);
        assert_eq!(board, Scoreboard { x_wins: 1, o_wins: 0, draws: 1 });
        assert_eq!(board.games(), 2);
    }
}
