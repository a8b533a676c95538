//! Interactive loop: stdin lines in, game events out.

use crate::display::{HELP, Input, TextDisplay};
use anyhow::{Context, Result};
use noughts::{GameConfig, GameController};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, instrument};

/// Runs games until the player quits or stdin closes.
#[instrument(skip_all)]
pub async fn run(config: GameConfig) -> Result<()> {
    let (mut game, mut tickets) = GameController::with_tokio(config.engine);
    let mut events = game.subscribe();
    let mut display = TextDisplay::new(std::io::stdout());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    display.message(HELP)?;
    game.start_game(config.player_specs())?;

    loop {
        while let Ok(event) = events.try_recv() {
            display.handle(&event).context("Failed to write to terminal")?;
        }
        display.prompt(game.status(), game.current_player())?;

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    info!("Input closed");
                    break;
                };
                match Input::parse(&line) {
                    Input::Quit => break,
                    Input::Nothing => {}
                    Input::Help => display.message(HELP)?,
                    Input::Unknown => {
                        display.message(format!("Unrecognized input: {}", line.trim()))?
                    }
                    Input::PlayAgain => game.play_again()?,
                    Input::NewGame => {
                        game.reset_game();
                        game.start_game(config.player_specs())?;
                    }
                    Input::Move(position) => {
                        if let Err(e) = game.try_submit_move(position.to_index()) {
                            debug!(%position, error = %e, "Move rejected");
                            display.message(format!("Can't play {}: {}", position, e))?;
                        }
                    }
                }
            }
            Some(ticket) = tickets.recv() => {
                game.run_scheduled(ticket)
                    .with_context(|| format!("Automated move {} failed", ticket))?;
            }
        }
    }

    let score = game.scoreboard();
    info!(
        x_wins = score.x_wins,
        o_wins = score.o_wins,
        draws = score.draws,
        "Session finished"
    );
    Ok(())
}
