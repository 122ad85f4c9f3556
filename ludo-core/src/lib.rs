//! LUDO Core - Board topology and token movement
//!
//! This crate provides the game logic for a four-colour Ludo board:
//! - Board geometry (4 arms x 3 lanes x 6 cells in a flat tile arena)
//! - Topology builder linking the shared ring and private home stretches
//! - Junction tiles that reroute their own colour into its home stretch
//! - Token movement engine
//! - Dice, turn order and a read-only view for renderers

pub mod board;
pub mod colour;
pub mod config;
pub mod dice;
pub mod error;
pub mod game;
pub mod movement;
pub mod token;
pub mod topology;
pub mod view;

// Re-exports for convenient access
pub use board::{Arm, Board, ColourRoute, Tile, TileCoord, TileId, ARMS, TILE_COUNT};
pub use colour::{Colour, PLAYER_COLOURS};
pub use config::{GameConfig, Lineup};
pub use dice::{Dice, Roll, RollAnimation};
pub use error::{ConfigError, MoveError, TopologyError};
pub use game::{Game, Home};
pub use movement::{advance, release, MoveOutcome};
pub use token::{Token, TokenPosition, TokenRef};
pub use topology::{MAX_ROUTE_STEPS, RING_LENGTH, STRETCH_LENGTH};
pub use view::{BoardView, TileView, TokenView};
