//! Tokens (discs) and their positions

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::board::TileId;
use crate::colour::Colour;

/// Tokens owned by each home
pub const TOKENS_PER_HOME: usize = 4;

/// Identity of a token: owning colour plus slot in its home
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenRef {
    pub colour: Colour,
    pub slot: u8,
}

impl TokenRef {
    pub const fn new(colour: Colour, slot: u8) -> Self {
        Self { colour, slot }
    }
}

impl fmt::Display for TokenRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} token {}", self.colour, self.slot)
    }
}

/// Where a token is
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", content = "tile", rename_all = "snake_case")]
pub enum TokenPosition {
    /// Waiting in its home
    Home,
    OnTile(TileId),
    /// Walked off the end of its home stretch
    Finished,
}

impl TokenPosition {
    pub fn tile(self) -> Option<TileId> {
        match self {
            TokenPosition::OnTile(tile) => Some(tile),
            _ => None,
        }
    }
}

impl fmt::Display for TokenPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenPosition::Home => f.write_str("home"),
            TokenPosition::OnTile(tile) => tile.fmt(f),
            TokenPosition::Finished => f.write_str("finished"),
        }
    }
}

/// A movable piece
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Token {
    pub colour: Colour,
    pub slot: u8,
    pub position: TokenPosition,
    /// Set once the token has been moved on the board
    pub out_of_home: bool,
}

impl Token {
    pub fn new(colour: Colour, slot: u8) -> Self {
        Self {
            colour,
            slot,
            position: TokenPosition::Home,
            out_of_home: false,
        }
    }

    pub fn id(&self) -> TokenRef {
        TokenRef::new(self.colour, self.slot)
    }

    pub fn is_home(&self) -> bool {
        self.position == TokenPosition::Home
    }

    pub fn is_finished(&self) -> bool {
        self.position == TokenPosition::Finished
    }

    pub fn tile(&self) -> Option<TileId> {
        self.position.tile()
    }
}
