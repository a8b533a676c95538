//! Noughts - a tic-tac-toe game engine
//!
//! The engine is the game-state machine only: move validation, turn
//! sequencing, win/draw detection and an automated opponent whose moves
//! land after a cancellable delay. Rendering and input belong to whatever
//! display drives it.
//!
//! # Architecture
//!
//! - **Board**: the nine cells; a cell never changes once marked
//! - **Rules**: pure evaluation of a snapshot (win beats full board)
//! - **Agent**: automated move selection behind the [`MovePolicy`] trait
//! - **Scheduler**: deferred delivery of agent moves, with cancellation
//! - **Controller**: owns the game state and ties it all together
//!
//! # Example
//!
//! ```
//! use noughts::{EngineConfig, GameController, GameStatus, ManualScheduler, Mark, PlayerSpec};
//!
//! let mut game = GameController::new(EngineConfig::default(), ManualScheduler::new());
//! game.start_game(vec![PlayerSpec::human("Alice"), PlayerSpec::human("Bob")])?;
//! for index in [0, 3, 1, 4, 2] {
//!     game.submit_move(index);
//! }
//! assert_eq!(game.status(), Some(GameStatus::Won(Mark::X)));
//! # Ok::<(), noughts::SetupError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod agent;
mod config;
mod controller;
mod error;
mod events;
mod player;
mod position;
mod scheduler;
mod state;
mod types;

// Public modules
pub mod invariants;
pub mod rules;

// Crate-level exports - Board and core values
pub use types::{Board, BoardSnapshot, CELL_COUNT, Cell, GameStatus, Mark, Move};

// Crate-level exports - Positions
pub use position::Position;

// Crate-level exports - Rules
pub use rules::{Outcome, evaluate};

// Crate-level exports - Players and agents
pub use agent::{AutomatedAgent, MovePolicy, RandomPolicy};
pub use player::{Player, PlayerKind, PlayerSpec};

// Crate-level exports - Scheduling
pub use scheduler::{
    ManualScheduler, ManualTask, Scheduler, TaskHandle, Ticket, TicketReceiver, TokioScheduler,
    TokioTask,
};

// Crate-level exports - Controller
pub use controller::GameController;
pub use events::{GameEvent, SeatInfo};
pub use state::{GameResult, GameState, Phase, Scoreboard};

// Crate-level exports - Configuration
pub use config::{EngineConfig, GameConfig, OpponentKind, SetupOptions};

// Crate-level exports - Errors
pub use error::{AgentError, BoardError, ConfigError, MoveError, SetupError};
