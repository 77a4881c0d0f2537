//! Game configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fewest players a game can be played with
pub const MIN_PLAYERS: usize = 2;

/// Errors from loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("player range {min}..={max} is invalid, it must start at 2 or more and not be empty")]
    PlayerRange { min: usize, max: usize },
}

/// Tunable game parameters.
///
/// Missing fields fall back to the standard rules when loading from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Regular turns per player before the final activation round
    pub regular_turns: u32,
    pub min_players: usize,
    pub max_players: usize,
    /// Face-up cards shown by each pile
    pub visible_cards: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            regular_turns: 9,
            min_players: 2,
            max_players: 4,
            visible_cards: 4,
        }
    }
}

impl GameConfig {
    /// Parse and validate a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the player range is playable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.has_valid_player_range() {
            Ok(())
        } else {
            Err(ConfigError::PlayerRange {
                min: self.min_players,
                max: self.max_players,
            })
        }
    }

    fn has_valid_player_range(&self) -> bool {
        self.min_players >= MIN_PLAYERS && self.min_players <= self.max_players
    }

    /// Whether `count` players may play. Never true for fewer than two.
    pub fn allows_player_count(&self, count: usize) -> bool {
        count >= MIN_PLAYERS && (self.min_players..=self.max_players).contains(&count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "regular_turns": 3 }"#).unwrap();
        assert_eq!(config.regular_turns, 3);
        assert_eq!(config.visible_cards, 4);
        assert!(config.allows_player_count(2));
        assert!(!config.allows_player_count(5));
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(
            GameConfig::from_json("{ \"regular_turns\": -1 }"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_unplayable_player_range_is_rejected() {
        assert!(matches!(
            GameConfig::from_json(r#"{ "min_players": 0 }"#),
            Err(ConfigError::PlayerRange { min: 0, max: 4 })
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "min_players": 4, "max_players": 3 }"#),
            Err(ConfigError::PlayerRange { min: 4, max: 3 })
        ));
        assert!(GameConfig::from_json(r#"{ "min_players": 3 }"#).is_ok());
    }

    #[test]
    fn test_fewer_than_two_players_never_allowed() {
        let config = GameConfig {
            min_players: 0,
            ..GameConfig::default()
        };
        assert!(!config.allows_player_count(0));
        assert!(!config.allows_player_count(1));
        assert!(config.allows_player_count(2));
    }
}
