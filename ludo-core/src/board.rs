//! Board geometry: arms, lanes and the tile arena

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::colour::Colour;
use crate::token::TokenRef;

/// Lanes per arm
pub const LANES: u8 = 3;

/// Cells per lane
pub const CELLS_PER_LANE: u8 = 6;

/// Tiles in one arm (3 lanes x 6 cells)
pub const TILES_PER_ARM: usize = (LANES * CELLS_PER_LANE) as usize;

/// Total number of tiles on the board
pub const TILE_COUNT: usize = 4 * TILES_PER_ARM;

/// The colour-private lane of every arm
pub const HOME_LANE: u8 = 1;

/// Side length of the square grid the board is drawn on
pub const GRID_SIZE: u8 = 15;

/// Board arm (quadrant)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arm {
    Left = 0,
    Right = 1,
    Top = 2,
    Bottom = 3,
}

/// All arms in arena order
pub const ARMS: [Arm; 4] = [Arm::Left, Arm::Right, Arm::Top, Arm::Bottom];

impl Arm {
    pub fn index(self) -> usize {
        self as usize
    }

    /// Colour whose home stretch runs down this arm
    pub fn colour(self) -> Colour {
        match self {
            Arm::Left => Colour::Green,
            Arm::Right => Colour::Blue,
            Arm::Top => Colour::Red,
            Arm::Bottom => Colour::Yellow,
        }
    }

    fn letter(self) -> char {
        match self {
            Arm::Left => 'L',
            Arm::Right => 'R',
            Arm::Top => 'T',
            Arm::Bottom => 'B',
        }
    }
}

/// Tile identity: (arm, lane, index)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub arm: Arm,
    pub lane: u8,
    pub index: u8,
}

impl TileCoord {
    pub const fn new(arm: Arm, lane: u8, index: u8) -> Self {
        Self { arm, lane, index }
    }

    pub fn is_valid(&self) -> bool {
        self.lane < LANES && self.index < CELLS_PER_LANE
    }

    /// Whether the tile belongs to the shared ring
    pub fn is_ring_lane(&self) -> bool {
        self.lane != HOME_LANE
    }

    /// (column, row) on the 15x15 grid
    ///
    /// Left and right arms run horizontally with lanes as rows, top and
    /// bottom arms run vertically with lanes as columns. Index 0 of the top
    /// and bottom arms sits next to the centre square.
    pub fn grid_cell(&self) -> (u8, u8) {
        let (lane, index) = (self.lane, self.index);
        match self.arm {
            Arm::Left => (index, 6 + lane),
            Arm::Right => (9 + index, 6 + lane),
            Arm::Top => (6 + lane, 5 - index),
            Arm::Bottom => (6 + lane, 9 + index),
        }
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}[{}]", self.arm.letter(), self.lane, self.index)
    }
}

/// Index into the tile arena
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u8);

impl TileId {
    pub const fn new(arm: Arm, lane: u8, index: u8) -> Self {
        debug_assert!(lane < LANES && index < CELLS_PER_LANE);
        TileId(arm as u8 * (LANES * CELLS_PER_LANE) + lane * CELLS_PER_LANE + index)
    }

    pub fn from_coord(coord: TileCoord) -> Self {
        Self::new(coord.arm, coord.lane, coord.index)
    }

    pub fn coord(self) -> TileCoord {
        let raw = self.0 as usize;
        let arm = ARMS[raw / TILES_PER_ARM];
        let within = (raw % TILES_PER_ARM) as u8;
        TileCoord::new(arm, within / CELLS_PER_LANE, within % CELLS_PER_LANE)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Whether the id names a tile of the arena
    pub fn is_valid(self) -> bool {
        self.index() < TILE_COUNT
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.coord().fmt(f)
    }
}

/// A single board tile
#[derive(Clone, Debug)]
pub struct Tile {
    pub coord: TileCoord,
    /// Colour whose home stretch this tile belongs to (Neutral on the ring)
    pub owner: Colour,
    /// Display colour
    pub paint: Colour,
    pub(crate) next: Option<TileId>,
    /// Ring-default successor, only set on junctions
    pub(crate) ring_next: Option<TileId>,
    /// Tokens standing here, in order of arrival
    pub(crate) occupants: Vec<TokenRef>,
}

impl Tile {
    pub(crate) fn blank(coord: TileCoord) -> Self {
        Self {
            coord,
            owner: Colour::Neutral,
            paint: Colour::Neutral,
            next: None,
            ring_next: None,
            occupants: Vec::new(),
        }
    }

    /// Current forward link (None = end of a home stretch)
    pub fn next(&self) -> Option<TileId> {
        self.next
    }

    /// Most recent arrival still on the tile
    pub fn occupant(&self) -> Option<TokenRef> {
        self.occupants.last().copied()
    }

    pub fn occupants(&self) -> &[TokenRef] {
        &self.occupants
    }

    pub fn is_junction(&self) -> bool {
        self.ring_next.is_some()
    }

    /// Ring-default link of a junction
    pub fn ring_next(&self) -> Option<TileId> {
        self.ring_next
    }
}

/// Start, junction and home-stretch entry of one colour
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColourRoute {
    pub colour: Colour,
    /// Where a released token is placed
    pub start: TileId,
    /// Junction where the colour leaves the ring
    pub junction: TileId,
    /// First cell of the private home stretch
    pub stretch_entry: TileId,
}

/// The tile graph
#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) tiles: Vec<Tile>,
    pub(crate) specials: Vec<TileId>,
    /// Indexed by `Colour::seat`
    pub(crate) routes: [ColourRoute; 4],
}

impl Board {
    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Panics on an id outside the arena; see `get`
    pub fn tile(&self, id: TileId) -> &Tile {
        &self.tiles[id.index()]
    }

    /// Checked lookup for ids that did not come from this board
    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.index())
    }

    pub fn tile_at(&self, coord: TileCoord) -> Option<&Tile> {
        if !coord.is_valid() {
            return None;
        }
        self.get(TileId::from_coord(coord))
    }

    /// Iterate tiles with their ids
    pub fn tiles(&self) -> impl Iterator<Item = (TileId, &Tile)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(|(i, tile)| (TileId(i as u8), tile))
    }

    /// Junction registry
    pub fn specials(&self) -> &[TileId] {
        &self.specials
    }

    pub fn is_special(&self, id: TileId) -> bool {
        self.specials.contains(&id)
    }

    pub fn route(&self, colour: Colour) -> Option<&ColourRoute> {
        colour.seat().map(|seat| &self.routes[seat])
    }

    pub fn routes(&self) -> &[ColourRoute; 4] {
        &self.routes
    }

    pub fn starting_tile(&self, colour: Colour) -> Option<TileId> {
        self.route(colour).map(|route| route.start)
    }

    pub fn is_starting_tile(&self, id: TileId) -> bool {
        self.routes.iter().any(|route| route.start == id)
    }

    pub fn next(&self, id: TileId) -> Option<TileId> {
        self.tile(id).next
    }

    pub fn occupant(&self, id: TileId) -> Option<TokenRef> {
        self.tile(id).occupant()
    }

    /// Successor of `id` for a token of `colour`
    ///
    /// Junctions only hand out their current link to their own colour; any
    /// other colour keeps following the ring.
    pub fn successor(&self, id: TileId, colour: Colour) -> Option<TileId> {
        let tile = self.tile(id);
        match tile.ring_next {
            Some(ring) if tile.owner != colour => Some(ring),
            _ => tile.next,
        }
    }

    /// Full path a token of `colour` takes from its starting tile to the
    /// last cell of its home stretch, without touching the board.
    ///
    /// Returns None for Neutral or if the walk does not terminate.
    pub fn route_of(&self, colour: Colour) -> Option<Vec<TileId>> {
        let route = self.route(colour)?;
        let mut path = vec![route.start];
        let mut current = route.start;
        loop {
            let next = if current == route.junction {
                Some(route.stretch_entry)
            } else {
                self.successor(current, colour)
            };
            match next {
                Some(tile) => {
                    if path.len() > TILE_COUNT {
                        return None;
                    }
                    path.push(tile);
                    current = tile;
                }
                None => return Some(path),
            }
        }
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    /// Record `token` as the newest occupant
    pub(crate) fn occupy(&mut self, id: TileId, token: TokenRef) {
        let occupants = &mut self.tiles[id.index()].occupants;
        occupants.retain(|other| *other != token);
        occupants.push(token);
    }

    /// Drop `token` from the tile; earlier arrivals keep their place
    pub(crate) fn leave(&mut self, id: TileId, token: TokenRef) {
        self.tiles[id.index()].occupants.retain(|other| *other != token);
    }

    /// Reroute a junction into the home stretch of `colour`
    ///
    /// Returns true only when the link actually changed.
    pub(crate) fn redirect(&mut self, id: TileId, colour: Colour) -> bool {
        let Some(route) = self.route(colour).copied() else {
            return false;
        };
        let tile = &mut self.tiles[id.index()];
        if !tile.is_junction() || tile.owner != colour {
            return false;
        }
        if tile.next == Some(route.stretch_entry) {
            return false;
        }
        tile.next = Some(route.stretch_entry);
        tracing::debug!(junction = %id, %colour, target = %route.stretch_entry, "junction redirected");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_id_roundtrip() {
        for raw in 0..TILE_COUNT as u8 {
            let id = TileId(raw);
            assert_eq!(TileId::from_coord(id.coord()), id);
        }
        assert_eq!(TileId::new(Arm::Bottom, 2, 5).index(), TILE_COUNT - 1);
    }

    #[test]
    fn test_grid_cells_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for raw in 0..TILE_COUNT as u8 {
            let (col, row) = TileId(raw).coord().grid_cell();
            assert!(col < GRID_SIZE && row < GRID_SIZE);
            assert!(seen.insert((col, row)), "cell {:?} used twice", (col, row));
        }
    }

    #[test]
    fn test_coord_display() {
        assert_eq!(TileId::new(Arm::Left, 0, 5).to_string(), "L0[5]");
        assert_eq!(TileCoord::new(Arm::Top, 1, 4).to_string(), "T1[4]");
    }

    #[test]
    fn test_checked_lookup() {
        let board = Board::build();
        assert!(board.get(TileId(71)).is_some());
        assert!(board.get(TileId(72)).is_none());
        assert!(board.get(TileId(u8::MAX)).is_none());
        assert!(!TileId(72).is_valid());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn test_out_of_range_index_does_not_alias() {
        let _ = TileId::new(Arm::Left, 2, CELLS_PER_LANE);
    }

    #[test]
    fn test_occupants_stack() {
        let mut board = Board::build();
        let id = TileId::new(Arm::Top, 0, 3);
        let a = TokenRef::new(Colour::Red, 0);
        let b = TokenRef::new(Colour::Blue, 1);

        board.occupy(id, a);
        board.occupy(id, b);
        assert_eq!(board.occupant(id), Some(b));
        assert_eq!(board.tile(id).occupants(), &[a, b]);

        board.leave(id, b);
        assert_eq!(board.occupant(id), Some(a));
        board.leave(id, a);
        assert_eq!(board.occupant(id), None);
    }

    #[test]
    fn test_invalid_coord() {
        let board = Board::build();
        assert!(board.tile_at(TileCoord::new(Arm::Left, 3, 0)).is_none());
        assert!(board.tile_at(TileCoord::new(Arm::Left, 0, 6)).is_none());
        assert!(board.tile_at(TileCoord::new(Arm::Left, 2, 5)).is_some());
    }
}
