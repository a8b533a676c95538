//! Player identities.

use crate::agent::{AutomatedAgent, MovePolicy};
use crate::types::Mark;
use derive_getters::Getters;
use tracing::instrument;

/// Who supplies a player's moves.
#[derive(Debug)]
pub enum PlayerKind {
    /// Moves arrive as move intents from the display.
    Human,
    /// Moves are chosen by an agent after a scheduled delay.
    Automated(AutomatedAgent),
}

impl PlayerKind {
    /// Checks if this player is automated.
    pub fn is_automated(&self) -> bool {
        matches!(self, PlayerKind::Automated(_))
    }
}

/// Request for one seat in a new game.
#[derive(Debug)]
pub struct PlayerSpec {
    /// Name shown by the display.
    pub display_name: String,
    /// Human or automated.
    pub kind: PlayerKind,
}

impl PlayerSpec {
    /// A human player.
    pub fn human(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            kind: PlayerKind::Human,
        }
    }

    /// An automated player picking uniformly at random.
    pub fn automated(display_name: impl Into<String>) -> Self {
        Self::automated_with(display_name, AutomatedAgent::random(None))
    }

    /// An automated player using a specific agent.
    pub fn automated_with(display_name: impl Into<String>, agent: AutomatedAgent) -> Self {
        Self {
            display_name: display_name.into(),
            kind: PlayerKind::Automated(agent),
        }
    }

    /// An automated player using a bare policy.
    pub fn with_policy(display_name: impl Into<String>, policy: impl MovePolicy + 'static) -> Self {
        Self::automated_with(display_name, AutomatedAgent::new(policy))
    }
}

/// A seated player.
#[derive(Debug, Getters)]
pub struct Player {
    /// Player's name.
    display_name: String,
    /// Which mark this player uses (X or O).
    marker: Mark,
    /// Human or automated.
    kind: PlayerKind,
}

impl Player {
    /// Seats a player from a spec.
    #[instrument(skip(spec), fields(name = %spec.display_name))]
    pub fn from_spec(spec: PlayerSpec, marker: Mark) -> Self {
        Self {
            display_name: spec.display_name,
            marker,
            kind: spec.kind,
        }
    }

    /// Checks if this player is automated.
    pub fn is_automated(&self) -> bool {
        self.kind.is_automated()
    }

    /// Mutable access to the agent of an automated player.
    pub fn agent_mut(&mut self) -> Option<&mut AutomatedAgent> {
        match &mut self.kind {
            PlayerKind::Automated(agent) => Some(agent),
            PlayerKind::Human => None,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.display_name, self.marker)
    }
}
