use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Game balance tunables. Every field is optional in the RON file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct GameConfig {
    pub shiny_chance: f64,
    pub boss_crit_chance: f64,
    pub boss_crit_multiplier: f64,
    pub base_points: f64,
    pub streak_rate: f64,
    pub berry_cost: f64,
    pub berry_heal_ratio: f64,
    /// Appended to the share text when set.
    pub share_url: String,
    pub timers: TimerConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            shiny_chance: 0.04,
            boss_crit_chance: 0.3,
            boss_crit_multiplier: 1.5,
            base_points: 20.0,
            streak_rate: 1.1,
            berry_cost: 100.0,
            berry_heal_ratio: 0.5,
            share_url: String::new(),
            timers: TimerConfig::default(),
        }
    }
}

/// Delays in milliseconds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TimerConfig {
    pub evolution_ms: u64,
    pub boss_appear_ms: u64,
    pub boss_turn_ms: u64,
    pub boss_strike_ms: u64,
    pub victory_ms: u64,
    pub game_over_ms: u64,
    pub mood_ms: u64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            evolution_ms: 4000,
            boss_appear_ms: 3000,
            boss_turn_ms: 1500,
            boss_strike_ms: 1000,
            victory_ms: 1500,
            game_over_ms: 1000,
            mood_ms: 2000,
        }
    }
}

pub fn parse_config(path: &Path, source: &str) -> Result<GameConfig, ConfigError> {
    ron::de::from_str(source).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub async fn load_config(path: &Path) -> Result<GameConfig, ConfigError> {
    let source = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    parse_config(path, &source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = parse_config(
            Path::new("balance.ron"),
            "(shiny_chance: 1.0, timers: (evolution_ms: 10))",
        )
        .expect("parse");
        assert_eq!(config.shiny_chance, 1.0);
        assert_eq!(config.timers.evolution_ms, 10);
        assert_eq!(config.timers.boss_appear_ms, 3000);
        assert_eq!(config.berry_cost, 100.0);
    }

    #[test]
    fn broken_file_names_the_path() {
        let err = parse_config(Path::new("broken.ron"), "(shiny_chance: ").unwrap_err();
        assert!(err.to_string().contains("broken.ron"));
    }
}
