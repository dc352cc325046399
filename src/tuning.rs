//! Data-driven game balance
//!
//! Everything a designer might want to tweak without touching the engine.
//! Loaded from JSON; any missing field takes its default.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::level::{CoinRequirement, LayoutTransform};
use crate::sim::outcome::OutcomeTuning;

/// Logical screen size in points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: f32,
    pub height: f32,
}

impl Default for ScreenSize {
    fn default() -> Self {
        // iPhone 14 logical resolution
        Self {
            width: 390.0,
            height: 844.0,
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board dimensions used to place pegs and the capsule
    pub screen: ScreenSize,
    /// Launch roll probabilities and impulse gains
    pub outcome: OutcomeTuning,
    /// Coins needed to clear a level
    pub coin_requirement: CoinRequirement,
    /// Highest level in the progression
    pub max_level: u32,
    /// Lives at the start of each level
    pub starting_lives: u8,
    /// Currency granted once per unlocked achievement
    pub achievement_bonus: i64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen: ScreenSize::default(),
            outcome: OutcomeTuning::default(),
            coin_requirement: CoinRequirement::default(),
            max_level: MAX_LEVEL,
            starting_lives: STARTING_LIVES,
            achievement_bonus: ACHIEVEMENT_BONUS,
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON, falling back to defaults for missing fields
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut config: Self = serde_json::from_str(json)?;
        config.sanitize();
        Ok(config)
    }

    /// Load a config file, or defaults if it is missing or malformed
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_default(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("Invalid config {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No config at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Layout transform for the configured screen
    pub fn layout(&self) -> LayoutTransform {
        LayoutTransform::new(self.screen.width, self.screen.height)
    }

    /// Clamp values that would break the engine's invariants
    fn sanitize(&mut self) {
        self.max_level = self.max_level.clamp(MIN_LEVEL, MAX_LEVEL);
        self.starting_lives = self.starting_lives.clamp(1, STARTING_LIVES);
        self.outcome.player_miss_sides = self.outcome.player_miss_sides.max(1);
        self.outcome.bot_hit_sides = self.outcome.bot_hit_sides.max(1);
        self.outcome.lateral_range = self.outcome.lateral_range.abs();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_balance_values() {
        let config = GameConfig::default();
        assert_eq!(config.max_level, 10);
        assert_eq!(config.starting_lives, 3);
        assert_eq!(config.coin_requirement, CoinRequirement::LevelScaled);
        assert_eq!(config.outcome.player_miss_sides, 10);
        assert_eq!(config.outcome.bot_hit_sides, 3);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "starting_lives": 2 }"#).unwrap();
        assert_eq!(config.starting_lives, 2);
        assert_eq!(config.max_level, 10);
        assert_eq!(config.screen, ScreenSize::default());
    }

    #[test]
    fn test_fixed_requirement_from_json() {
        let config = GameConfig::from_json(r#"{ "coin_requirement": { "Fixed": 1 } }"#).unwrap();
        assert_eq!(config.coin_requirement, CoinRequirement::Fixed(1));
    }

    #[test]
    fn test_sanitize_clamps_levels_and_lives() {
        let config = GameConfig::from_json(r#"{ "max_level": 99, "starting_lives": 0 }"#).unwrap();
        assert_eq!(config.max_level, 10);
        assert_eq!(config.starting_lives, 1);
    }

    #[test]
    fn test_sanitize_caps_lives() {
        let config = GameConfig::from_json(r#"{ "starting_lives": 9 }"#).unwrap();
        assert_eq!(config.starting_lives, STARTING_LIVES);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(GameConfig::from_json("{ not json").is_err());
    }
}
