//! Game configuration, loaded from TOML.
//!
//! ```toml
//! [setup]
//! opponent_kind = "automated"
//! player_one_name = "Alice"
//!
//! [engine]
//! agent_delay_ms = 500
//! agent_seed = 7
//! ```

use crate::agent::AutomatedAgent;
use crate::error::ConfigError;
use crate::player::PlayerSpec;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Kind of the second player.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OpponentKind {
    /// Two people share the board.
    #[default]
    Human,
    /// The second seat is played by an agent.
    Automated,
}

/// Player setup options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupOptions {
    /// Who plays the second seat.
    pub opponent_kind: OpponentKind,
    /// First player's name (plays X).
    pub player_one_name: String,
    /// Second player's name (plays O). Defaults depend on `opponent_kind`.
    pub player_two_name: Option<String>,
}

impl Default for SetupOptions {
    fn default() -> Self {
        Self {
            opponent_kind: OpponentKind::default(),
            player_one_name: default_player_one_name(),
            player_two_name: None,
        }
    }
}

fn default_player_one_name() -> String {
    "Player 1".to_string()
}

impl SetupOptions {
    /// Second player's name, falling back to a kind-specific default.
    pub fn player_two_name(&self) -> String {
        match (&self.player_two_name, self.opponent_kind) {
            (Some(name), _) => name.clone(),
            (None, OpponentKind::Human) => "Player 2".to_string(),
            (None, OpponentKind::Automated) => "Computer".to_string(),
        }
    }

    /// Builds the two specs for `start_game`; the first gets X.
    #[instrument(skip(self), fields(opponent = %self.opponent_kind))]
    pub fn player_specs(&self, agent_seed: Option<u64>) -> Vec<PlayerSpec> {
        let first = PlayerSpec::human(self.player_one_name.clone());
        let second = match self.opponent_kind {
            OpponentKind::Human => PlayerSpec::human(self.player_two_name()),
            OpponentKind::Automated => PlayerSpec::automated_with(
                self.player_two_name(),
                AutomatedAgent::random(agent_seed),
            ),
        };
        vec![first, second]
    }
}

/// Engine tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Delay before an automated move lands, in milliseconds.
    pub agent_delay_ms: u64,
    /// Seed for automated players; `None` draws from OS entropy.
    pub agent_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            agent_delay_ms: 500,
            agent_seed: None,
        }
    }
}

impl EngineConfig {
    /// The "thinking" delay as a duration.
    pub fn agent_delay(&self) -> Duration {
        Duration::from_millis(self.agent_delay_ms)
    }
}

/// Full configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Player setup.
    pub setup: SetupOptions,
    /// Engine tuning.
    pub engine: EngineConfig,
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml_str(&content)?;
        info!(opponent = %config.setup.opponent_kind, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Serializes configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string(self)
            .map_err(|e| ConfigError::new(format!("Failed to serialize config: {}", e)))
    }

    /// Player specs for `start_game`, seeded from the engine config.
    pub fn player_specs(&self) -> Vec<PlayerSpec> {
        self.setup.player_specs(self.engine.agent_seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = GameConfig::from_toml_str("").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.engine.agent_delay(), Duration::from_millis(500));
        assert_eq!(config.setup.player_two_name(), "Player 2");
    }

    #[test]
    fn test_automated_opponent_defaults_to_computer() {
        let config = GameConfig::from_toml_str(
            r#"
            [setup]
            opponent_kind = "automated"
            player_one_name = "Alice"

            [engine]
            agent_delay_ms = 0
            agent_seed = 9
            "#,
        )
        .unwrap();
        assert_eq!(config.setup.opponent_kind, OpponentKind::Automated);
        assert_eq!(config.setup.player_two_name(), "Computer");
        assert_eq!(config.engine.agent_seed, Some(9));

        let specs = config.player_specs();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].display_name, "Alice");
        assert!(!specs[0].kind.is_automated());
        assert!(specs[1].kind.is_automated());
    }

    #[test]
    fn test_unknown_opponent_kind_is_rejected() {
        let err = GameConfig::from_toml_str("[setup]\nopponent_kind = \"wizard\"").unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = GameConfig::default();
        config.setup.player_two_name = Some("Bob".to_string());
        config.engine.agent_seed = Some(1);
        let text = config.to_toml().unwrap();
        assert_eq!(GameConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_opponent_kind_parses_from_cli_text() {
        assert_eq!("automated".parse::<OpponentKind>().unwrap(), OpponentKind::Automated);
        assert_eq!(OpponentKind::Human.to_string(), "human");
    }
}
