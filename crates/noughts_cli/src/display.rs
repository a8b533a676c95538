//! Line-based rendering of game events.

use noughts::{GameEvent, GameStatus, Mark, Player, Position, SeatInfo};
use std::io::{self, Write};
use tracing::debug;

/// What the player typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Play a cell.
    Move(Position),
    /// Rematch with the same players.
    PlayAgain,
    /// Reset and seat the players again.
    NewGame,
    /// Show the help text.
    Help,
    /// Leave.
    Quit,
    /// Blank line.
    Nothing,
    /// Anything unrecognized.
    Unknown,
}

impl Input {
    /// Parses one line of user input.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line.to_lowercase().as_str() {
            "" => Input::Nothing,
            "q" | "quit" | "exit" => Input::Quit,
            "r" | "again" | "rematch" => Input::PlayAgain,
            "n" | "new" | "reset" => Input::NewGame,
            "h" | "help" | "?" => Input::Help,
            _ => Position::from_label_or_number(line)
                .map(Input::Move)
                .unwrap_or(Input::Unknown),
        }
    }
}

/// Help text listing the commands.
pub const HELP: &str = "Enter a cell number (1-9) or name (e.g. \"center\"). \
'r' rematch, 'n' new game, 'q' quit.";

/// Writes events as plain text.
pub struct TextDisplay<W> {
    out: W,
    seats: Option<[SeatInfo; 2]>,
}

impl<W: Write> TextDisplay<W> {
    /// Creates a display writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out, seats: None }
    }

    fn name_of(&self, marker: Mark) -> String {
        self.seats
            .as_ref()
            .and_then(|seats| seats.iter().find(|seat| seat.marker == marker))
            .map(|seat| seat.name.clone())
            .unwrap_or_else(|| marker.to_string())
    }

    /// Renders one event.
    pub fn handle(&mut self, event: &GameEvent) -> io::Result<()> {
        debug!(?event, "Rendering game event");
        match event {
            GameEvent::GameStarted { players } => {
                let [x, o] = players;
                writeln!(self.out)?;
                writeln!(self.out, "{} (X) vs {} (O)", x.name, o.name)?;
                writeln!(self.out, "{}", noughts::BoardSnapshot::default())?;
                self.seats = Some(players.clone());
            }
            GameEvent::MovePlayed { mv, snapshot } => {
                let cell = Position::from_index(mv.index)
                    .map(|pos| pos.label())
                    .unwrap_or("?");
                writeln!(self.out)?;
                let name = self.name_of(mv.marker);
                writeln!(self.out, "{} ({}) played {}", name, mv.marker, cell)?;
                writeln!(self.out, "{}", snapshot)?;
            }
            GameEvent::AgentThinking { name, .. } => {
                writeln!(self.out, "{} is thinking...", name)?;
            }
            GameEvent::GameOver {
                result,
                line,
                scoreboard,
                ..
            } => {
                writeln!(self.out)?;
                writeln!(self.out, "{}!", result)?;
                if let Some([a, b, c]) = line {
                    writeln!(self.out, "Winning line: {}-{}-{}", a + 1, b + 1, c + 1)?;
                }
                writeln!(
                    self.out,
                    "Score: X {} | O {} | draws {}",
                    scoreboard.x_wins, scoreboard.o_wins, scoreboard.draws
                )?;
                writeln!(self.out, "'r' to play again, 'n' for a new game, 'q' to quit.")?;
            }
            GameEvent::Reset => {
                writeln!(self.out, "Game reset.")?;
                self.seats = None;
            }
        }
        self.out.flush()
    }

    /// Asks the current human player for a move.
    pub fn prompt(
        &mut self,
        status: Option<GameStatus>,
        current: Option<&Player>,
    ) -> io::Result<()> {
        if let (Some(GameStatus::InProgress), Some(player)) = (status, current) {
            if !player.is_automated() {
                write!(self.out, "{}, choose a cell: ", player)?;
                self.out.flush()?;
            }
        }
        Ok(())
    }

    /// Shows a one-line message.
    pub fn message(&mut self, text: impl std::fmt::Display) -> io::Result<()> {
        writeln!(self.out, "{}", text)?;
        self.out.flush()
    }

    /// The underlying writer.
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}
