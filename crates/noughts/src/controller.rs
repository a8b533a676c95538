//! Turn orchestration.
//!
//! [`GameController`] owns the only [`GameState`], applies validated moves,
//! evaluates the board after each one, and schedules the automated
//! player's move when it is due. At most one automated move is pending at
//! a time; it is cancelled on every reset, restart and terminal transition,
//! and a ticket that slips through anyway is rejected when it is run.

use crate::config::EngineConfig;
use crate::error::{AgentError, MoveError, SetupError};
use crate::events::{GameEvent, SeatInfo};
use crate::invariants::debug_assert_invariants;
use crate::player::{Player, PlayerSpec};
use crate::rules;
use crate::scheduler::{Scheduler, TaskHandle, Ticket, TicketReceiver, TokioScheduler};
use crate::state::{GameResult, GameState, Phase, Scoreboard};
use crate::types::{BoardSnapshot, GameStatus, Mark, Move};
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

struct Pending<H> {
    ticket: Ticket,
    handle: H,
}

/// Orchestrates turns for one game instance at a time.
pub struct GameController<S: Scheduler = TokioScheduler> {
    config: EngineConfig,
    scheduler: S,
    game: Option<GameState>,
    pending: Option<Pending<S::Handle>>,
    epoch: u64,
    next_ticket: u64,
    scoreboard: Scoreboard,
    subscribers: Vec<mpsc::UnboundedSender<GameEvent>>,
}

impl GameController<TokioScheduler> {
    /// Creates a controller backed by `tokio` timers.
    ///
    /// Fired tickets arrive on the returned receiver and must be passed to
    /// [`run_scheduled`](Self::run_scheduled).
    pub fn with_tokio(config: EngineConfig) -> (Self, TicketReceiver) {
        let (scheduler, rx) = TokioScheduler::new();
        (Self::new(config, scheduler), rx)
    }
}

impl<S: Scheduler> GameController<S> {
    /// Creates a controller in the setup phase.
    pub fn new(config: EngineConfig, scheduler: S) -> Self {
        Self {
            config,
            scheduler,
            game: None,
            pending: None,
            epoch: 0,
            next_ticket: 0,
            scoreboard: Scoreboard::default(),
            subscribers: Vec::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Lifecycle
    // ─────────────────────────────────────────────────────────────

    /// Seats two players and starts a game on a cleared board.
    ///
    /// Markers alternate from X in the order given. If the first player is
    /// automated, its move is scheduled immediately. The scoreboard starts
    /// over for the new pairing.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::InvalidPlayerCount`] unless exactly two specs
    /// are given. The controller is untouched on error.
    #[instrument(skip(self, specs), fields(count = specs.len()))]
    pub fn start_game(&mut self, specs: Vec<PlayerSpec>) -> Result<(), SetupError> {
        let count = specs.len();
        let [first, second]: [PlayerSpec; 2] = specs.try_into().map_err(|_| {
            error!(count, "Rejected game setup");
            SetupError::InvalidPlayerCount { count }
        })?;

        self.cancel_pending();
        self.epoch += 1;
        self.scoreboard = Scoreboard::default();
        let players = [
            Player::from_spec(first, Mark::for_seat(0)),
            Player::from_spec(second, Mark::for_seat(1)),
        ];
        self.game = Some(GameState::new(players));
        info!(epoch = self.epoch, "Game started");

        self.announce_start();
        self.schedule_agent_if_due();
        Ok(())
    }

    /// Restarts with the same players on a cleared board.
    ///
    /// Allowed mid-game as well as after the game is over. Any pending
    /// automated move is cancelled first.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::NoPlayers`] in the setup phase.
    #[instrument(skip(self))]
    pub fn play_again(&mut self) -> Result<(), SetupError> {
        if self.game.is_none() {
            warn!("play_again called with no players");
            return Err(SetupError::NoPlayers);
        }
        self.cancel_pending();
        self.epoch += 1;
        if let Some(game) = self.game.as_mut() {
            game.restart();
        }
        info!(epoch = self.epoch, "Rematch started");

        self.announce_start();
        self.schedule_agent_if_due();
        Ok(())
    }

    /// Discards the players and returns to the setup phase.
    #[instrument(skip(self))]
    pub fn reset_game(&mut self) {
        self.cancel_pending();
        self.epoch += 1;
        self.game = None;
        self.scoreboard = Scoreboard::default();
        info!(epoch = self.epoch, "Game reset");
        self.emit(GameEvent::Reset);
    }

    // ─────────────────────────────────────────────────────────────
    //  Moves
    // ─────────────────────────────────────────────────────────────

    /// Applies a move intent from the display for the current player.
    ///
    /// Returns `false` and leaves every piece of state untouched when the
    /// move is rejected; see [`try_submit_move`](Self::try_submit_move) for
    /// the reason.
    pub fn submit_move(&mut self, index: usize) -> bool {
        match self.try_submit_move(index) {
            Ok(()) => true,
            Err(err) => {
                debug!(index, error = %err, "Move intent ignored");
                false
            }
        }
    }

    /// Like [`submit_move`](Self::submit_move), reporting why a move was
    /// rejected.
    ///
    /// # Errors
    ///
    /// - [`MoveError::GameNotInProgress`] in setup or after the game ended
    /// - [`MoveError::AwaitingAgent`] while the automated player is to move
    /// - [`MoveError::IndexOutOfRange`] / [`MoveError::CellOccupied`] from
    ///   the board
    #[instrument(skip(self))]
    pub fn try_submit_move(&mut self, index: usize) -> Result<(), MoveError> {
        let game = self.game.as_ref().ok_or(MoveError::GameNotInProgress)?;
        if game.status.is_terminal() {
            return Err(MoveError::GameNotInProgress);
        }
        if game.current_player().is_automated() {
            return Err(MoveError::AwaitingAgent);
        }
        self.apply_move(index)
    }

    /// Runs a fired scheduled task: lets the automated player move.
    ///
    /// Returns `Ok(false)` without touching state when the ticket is not
    /// the one currently pending (cancelled, from an earlier game, or
    /// already run), or when the game is no longer waiting on an agent.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::NoAvailableMove`] if the agent finds no empty
    /// cell, which means the controller broke its own contract, and
    /// [`AgentError::IllegalMove`] if the policy picks a cell the board
    /// rejects. Either way the game is left waiting on the agent.
    #[instrument(skip(self, ticket), fields(ticket = %ticket))]
    pub fn run_scheduled(&mut self, ticket: Ticket) -> Result<bool, AgentError> {
        match &self.pending {
            Some(pending) if pending.ticket == ticket => {}
            _ => {
                warn!("Ignoring stale agent ticket");
                return Ok(false);
            }
        }
        self.pending = None;

        if ticket.epoch != self.epoch {
            warn!(epoch = self.epoch, "Ignoring agent ticket from another game");
            return Ok(false);
        }
        let Some(game) = self.game.as_mut() else {
            warn!("Ignoring agent ticket in setup");
            return Ok(false);
        };
        if game.status.is_terminal() {
            warn!(status = ?game.status, "Ignoring agent ticket after game over");
            return Ok(false);
        }

        let snapshot = game.board.snapshot();
        let seat = game.current_player_index;
        let Some(agent) = game.players[seat].agent_mut() else {
            warn!(seat, "Ignoring agent ticket on a human turn");
            return Ok(false);
        };
        let policy = agent.policy_name();
        let index = agent.choose_move(&snapshot).inspect_err(|err| {
            error!(policy, error = %err, "Agent could not move");
        })?;

        self.apply_move(index).map_err(|err| {
            error!(policy, index, error = %err, "Agent chose an illegal move");
            AgentError::IllegalMove { index }
        })?;
        Ok(true)
    }

    /// Places the current player's mark, advances the turn and settles the
    /// status. Either succeeds completely or changes nothing.
    fn apply_move(&mut self, index: usize) -> Result<(), MoveError> {
        let game = self.game.as_mut().ok_or(MoveError::GameNotInProgress)?;
        if game.status.is_terminal() {
            return Err(MoveError::GameNotInProgress);
        }

        let marker = *game.current_player().marker();
        game.board.place(index, marker)?;
        let mv = Move::new(marker, index);
        game.history.push(mv);
        game.current_player_index = 1 - game.current_player_index;

        let snapshot = game.board.snapshot();
        game.status = rules::evaluate(&snapshot).into();
        debug_assert_invariants(game);

        let status = game.status;
        debug!(%mv, ?status, "Move applied");
        self.emit(GameEvent::MovePlayed { mv, snapshot });

        if status.is_terminal() {
            self.finish(snapshot);
        } else {
            self.schedule_agent_if_due();
        }
        Ok(())
    }

    /// Handles the transition into a terminal status.
    fn finish(&mut self, snapshot: BoardSnapshot) {
        self.cancel_pending();
        let Some(game) = self.game.as_ref() else {
            return;
        };
        let Some(result) = game.result() else {
            return;
        };
        self.scoreboard.record(game.status);
        let line = rules::winning_line(&snapshot).map(|(line, _)| line);
        info!(%result, moves = game.history.len(), "Game over");
        self.emit(GameEvent::GameOver {
            result,
            snapshot,
            line,
            scoreboard: self.scoreboard,
        });
    }

    // ─────────────────────────────────────────────────────────────
    //  Scheduling
    // ─────────────────────────────────────────────────────────────

    /// Schedules the automated player's move if the game is running and
    /// it is that player's turn.
    fn schedule_agent_if_due(&mut self) {
        let Some(game) = self.game.as_ref() else {
            return;
        };
        if game.status.is_terminal() {
            return;
        }
        let current = game.current_player();
        if !current.is_automated() {
            return;
        }
        let name = current.display_name().clone();
        let marker = *current.marker();

        self.cancel_pending();
        self.next_ticket += 1;
        let ticket = Ticket {
            id: self.next_ticket,
            epoch: self.epoch,
        };
        let handle = self.scheduler.schedule(self.config.agent_delay(), ticket);
        self.pending = Some(Pending { ticket, handle });
        debug!(%ticket, %marker, "Agent move scheduled");
        self.emit(GameEvent::AgentThinking { name, marker });
    }

    fn cancel_pending(&mut self) {
        if let Some(mut pending) = self.pending.take() {
            pending.handle.cancel();
            debug!(ticket = %pending.ticket, "Cancelled pending agent move");
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Notifications
    // ─────────────────────────────────────────────────────────────

    /// Subscribes to game events from now on.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<GameEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    fn emit(&mut self, event: GameEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    fn announce_start(&mut self) {
        let Some(game) = self.game.as_ref() else {
            return;
        };
        let players = game.players.each_ref().map(|player| SeatInfo {
            name: player.display_name().clone(),
            marker: *player.marker(),
            automated: player.is_automated(),
        });
        self.emit(GameEvent::GameStarted { players });
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        match &self.game {
            None => Phase::Setup,
            Some(game) => match game.result() {
                None => Phase::InProgress,
                Some(result) => Phase::Finished(result),
            },
        }
    }

    /// Status of the current game; `None` in setup.
    pub fn status(&self) -> Option<GameStatus> {
        self.game.as_ref().map(|game| game.status)
    }

    /// Copy of the board. Empty in setup.
    pub fn snapshot(&self) -> BoardSnapshot {
        self.game
            .as_ref()
            .map(GameState::snapshot)
            .unwrap_or_default()
    }

    /// The game state, if players are seated.
    pub fn state(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    /// Seat whose turn it is.
    pub fn current_player_index(&self) -> Option<usize> {
        self.game.as_ref().map(|game| game.current_player_index)
    }

    /// The player whose turn it is.
    pub fn current_player(&self) -> Option<&Player> {
        self.game.as_ref().map(GameState::current_player)
    }

    /// Accepted moves of the current game.
    pub fn history(&self) -> &[Move] {
        self.game
            .as_ref()
            .map(|game| game.history.as_slice())
            .unwrap_or_default()
    }

    /// Result of the current game once it is over.
    pub fn result(&self) -> Option<GameResult> {
        self.game.as_ref().and_then(GameState::result)
    }

    /// Tally since the players were seated.
    pub fn scoreboard(&self) -> Scoreboard {
        self.scoreboard
    }

    /// Ticket of the pending automated move, if any.
    pub fn pending_ticket(&self) -> Option<Ticket> {
        self.pending.as_ref().map(|pending| pending.ticket)
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
