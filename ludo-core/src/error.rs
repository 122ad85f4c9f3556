//! Error types

use thiserror::Error;

use crate::board::TileId;
use crate::colour::Colour;
use crate::token::TokenRef;

/// Unknown colour name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown colour: {0}")]
pub struct ParseColourError(pub String);

/// Game construction failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Unsupported player count: {0} (expected 2, 3 or 4)")]
    UnsupportedPlayerCount(u8),
}

/// Rejected release or move; nothing on the board changes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("Invalid step count: {steps} (expected 1-6)")]
    InvalidSteps { steps: u8 },

    #[error("No roll committed")]
    NoRoll,

    #[error("{token} cannot move, it is {current}'s turn")]
    NotYourTurn { token: TokenRef, current: Colour },

    #[error("{0} is not in play")]
    NotInPlay(Colour),

    #[error("{0} does not exist")]
    UnknownToken(TokenRef),

    #[error("{0} has already left home")]
    AlreadyReleased(TokenRef),

    #[error("{0} is not on the board")]
    NotOnBoard(TokenRef),
}

/// Broken graph invariant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    #[error("Expected 4 junctions, found {found}")]
    JunctionCount { found: usize },

    #[error("Shared ring is not a single 52-tile cycle (walked {found} tiles)")]
    RingLength { found: usize },

    #[error("Starting tile of {colour} is not on the shared ring")]
    StartOffRing { colour: Colour },

    #[error("Junction {junction} does not redirect into its own home stretch")]
    BadRedirect { junction: TileId },

    #[error("Route of {colour} revisits {tile}")]
    Cycle { colour: Colour, tile: TileId },

    #[error("Route of {colour} does not finish within {steps} steps")]
    Unterminated { colour: Colour, steps: usize },
}
