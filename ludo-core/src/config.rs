//! Game configuration
//!
//! Player count decides which colours take turns and what each home is
//! called. The board itself is identical for every player count.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::colour::Colour;
use crate::error::ConfigError;

pub const MIN_PLAYERS: u8 = 2;
pub const MAX_PLAYERS: u8 = 4;

/// Active colours and home names for one player count
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lineup {
    /// Turn order
    pub active: &'static [Colour],
    /// Home names in `PLAYER_COLOURS` order
    pub home_names: [&'static str; 4],
}

const FOUR_PLAYERS: Lineup = Lineup {
    active: &[Colour::Green, Colour::Yellow, Colour::Red, Colour::Blue],
    home_names: ["green", "yellow", "red", "blue"],
};

const THREE_PLAYERS: Lineup = Lineup {
    active: &[Colour::Yellow, Colour::Red, Colour::Blue],
    home_names: ["white", "yellow", "red", "blue"],
};

// Only green and blue take turns; the yellow and red homes carry their names
const TWO_PLAYERS: Lineup = Lineup {
    active: &[Colour::Green, Colour::Blue],
    home_names: ["green", "blue", "green", "blue"],
};

/// Lineup for a player count
pub fn lineup(players: u8) -> Result<Lineup, ConfigError> {
    match players {
        4 => Ok(FOUR_PLAYERS),
        3 => Ok(THREE_PLAYERS),
        2 => Ok(TWO_PLAYERS),
        other => Err(ConfigError::UnsupportedPlayerCount(other)),
    }
}

/// Game setup
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of players (2-4)
    pub players: u8,
    /// Dice seed (None = random)
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            players: MAX_PLAYERS,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn with_players(mut self, players: u8) -> Self {
        self.players = players;
        self
    }

    /// Set dice seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        lineup(self.players).map(|_| ())
    }

    pub fn lineup(&self) -> Result<Lineup, ConfigError> {
        lineup(self.players)
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
