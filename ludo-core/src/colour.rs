//! Colour definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::board::Arm;
use crate::error::ParseColourError;

/// Tile and token colour
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colour {
    Green,
    Yellow,
    Red,
    Blue,
    /// Shared ring tiles, junction paint
    Neutral,
}

/// Playable colours in seating order
pub const PLAYER_COLOURS: [Colour; 4] = [Colour::Green, Colour::Yellow, Colour::Red, Colour::Blue];

impl Colour {
    /// Seat index (0-3) for playable colours
    pub fn seat(self) -> Option<usize> {
        match self {
            Colour::Green => Some(0),
            Colour::Yellow => Some(1),
            Colour::Red => Some(2),
            Colour::Blue => Some(3),
            Colour::Neutral => None,
        }
    }

    /// Arm of the board whose private lane belongs to this colour
    pub fn arm(self) -> Option<Arm> {
        match self {
            Colour::Green => Some(Arm::Left),
            Colour::Yellow => Some(Arm::Bottom),
            Colour::Red => Some(Arm::Top),
            Colour::Blue => Some(Arm::Right),
            Colour::Neutral => None,
        }
    }

    pub fn is_player(self) -> bool {
        self != Colour::Neutral
    }

    pub fn name(self) -> &'static str {
        match self {
            Colour::Green => "green",
            Colour::Yellow => "yellow",
            Colour::Red => "red",
            Colour::Blue => "blue",
            Colour::Neutral => "white",
        }
    }

    /// Single-letter code used by text renderers
    pub fn letter(self) -> char {
        match self {
            Colour::Green => 'g',
            Colour::Yellow => 'y',
            Colour::Red => 'r',
            Colour::Blue => 'b',
            Colour::Neutral => '.',
        }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Colour {
    type Err = ParseColourError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "green" | "g" => Ok(Colour::Green),
            "yellow" | "y" => Ok(Colour::Yellow),
            "red" | "r" => Ok(Colour::Red),
            "blue" | "b" => Ok(Colour::Blue),
            "white" | "neutral" => Ok(Colour::Neutral),
            _ => Err(ParseColourError(s.to_string())),
        }
    }
}
