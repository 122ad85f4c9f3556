//! Read-only snapshot for renderers
//!
//! Front ends draw from a `BoardView` and never touch `Game` directly.

use serde::{Deserialize, Serialize};

use crate::board::{Arm, TileId};
use crate::colour::Colour;
use crate::dice::Roll;
use crate::game::Game;
use crate::token::{TokenPosition, TokenRef};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TileView {
    pub id: TileId,
    pub label: String,
    pub arm: Arm,
    pub lane: u8,
    pub index: u8,
    pub owner: Colour,
    pub paint: Colour,
    /// (column, row) on the 15x15 grid
    pub cell: (u8, u8),
    pub next: Option<TileId>,
    pub occupant: Option<TokenRef>,
    pub junction: bool,
    pub starting: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenView {
    pub colour: Colour,
    pub slot: u8,
    pub position: TokenPosition,
    pub cell: Option<(u8, u8)>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HomeView {
    pub colour: Colour,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BoardView {
    pub tiles: Vec<TileView>,
    pub tokens: Vec<TokenView>,
    pub homes: Vec<HomeView>,
    pub active: Vec<Colour>,
    pub current_player: Colour,
    pub roll: Option<Roll>,
    pub winner: Option<Colour>,
}

impl BoardView {
    /// Tile drawn at a grid cell, if any
    pub fn tile_at_cell(&self, cell: (u8, u8)) -> Option<&TileView> {
        self.tiles.iter().find(|tile| tile.cell == cell)
    }

    /// Tokens standing on a grid cell
    pub fn tokens_at_cell(&self, cell: (u8, u8)) -> impl Iterator<Item = &TokenView> + '_ {
        self.tokens.iter().filter(move |token| token.cell == Some(cell))
    }
}

impl Game {
    pub fn view(&self) -> BoardView {
        let board = self.board();

        let tiles = board
            .tiles()
            .map(|(id, tile)| TileView {
                id,
                label: id.to_string(),
                arm: tile.coord.arm,
                lane: tile.coord.lane,
                index: tile.coord.index,
                owner: tile.owner,
                paint: tile.paint,
                cell: tile.coord.grid_cell(),
                next: tile.next(),
                occupant: tile.occupant(),
                junction: tile.is_junction(),
                starting: board.is_starting_tile(id),
            })
            .collect();

        let tokens = self
            .tokens()
            .map(|token| TokenView {
                colour: token.colour,
                slot: token.slot,
                position: token.position,
                cell: token.tile().map(|tile| tile.coord().grid_cell()),
            })
            .collect();

        let homes = self
            .homes()
            .iter()
            .map(|home| HomeView {
                colour: home.colour,
                name: home.name.clone(),
            })
            .collect();

        BoardView {
            tiles,
            tokens,
            homes,
            active: self.active_colours().to_vec(),
            current_player: self.current_player(),
            roll: self.pending_roll(),
            winner: self.winner(),
        }
    }
}
