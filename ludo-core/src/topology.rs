//! Board topology builder and invariant checks
//!
//! The ring is built from a per-arm table. Each arm has an inbound ring lane
//! (running toward the centre square), an outbound ring lane (running away
//! from it) and the private home lane in the middle. Walking clockwise:
//!
//! - outbound lane, centre end to outer end
//! - junction (home lane, outer end)
//! - inbound lane, outer end to centre end
//! - outbound lane of the next arm
//!
//! The home lane runs from the junction toward the centre and stops there.

use rustc_hash::FxHashSet;

use crate::board::{Arm, Board, ColourRoute, Tile, TileId, CELLS_PER_LANE, HOME_LANE, TILE_COUNT};
use crate::colour::Colour;
use crate::error::TopologyError;

/// Tiles on the shared ring (13 per arm)
pub const RING_LENGTH: usize = 52;

/// Private home-stretch cells per colour, junction excluded
pub const STRETCH_LENGTH: usize = 5;

/// Upper bound on steps from a starting tile to the finish
pub const MAX_ROUTE_STEPS: usize = 58;

/// Per-arm linkage rules
#[derive(Clone, Copy, Debug)]
struct ArmLayout {
    arm: Arm,
    inbound: u8,
    outbound: u8,
    /// Index of the cell touching the centre square
    centre: u8,
    /// Next arm clockwise
    next: Arm,
}

impl ArmLayout {
    fn outer(&self) -> u8 {
        CELLS_PER_LANE - 1 - self.centre
    }

    /// Whether indices grow toward the centre
    fn runs_up(&self) -> bool {
        self.centre > self.outer()
    }

    /// One cell closer to the centre, None at the centre end
    fn inward(&self, index: u8) -> Option<u8> {
        if index == self.centre {
            None
        } else if self.runs_up() {
            Some(index + 1)
        } else {
            Some(index - 1)
        }
    }

    /// One cell closer to the board edge, None at the outer end
    fn outward(&self, index: u8) -> Option<u8> {
        if index == self.outer() {
            None
        } else if self.runs_up() {
            Some(index - 1)
        } else {
            Some(index + 1)
        }
    }

    fn junction(&self) -> TileId {
        TileId::new(self.arm, HOME_LANE, self.outer())
    }

    fn entry(&self) -> TileId {
        TileId::new(self.arm, self.outbound, self.centre)
    }
}

/// Indexed by `Arm::index`
const ARM_LAYOUTS: [ArmLayout; 4] = [
    ArmLayout { arm: Arm::Left, inbound: 0, outbound: 2, centre: 5, next: Arm::Top },
    ArmLayout { arm: Arm::Right, inbound: 2, outbound: 0, centre: 0, next: Arm::Bottom },
    ArmLayout { arm: Arm::Top, inbound: 2, outbound: 0, centre: 0, next: Arm::Right },
    ArmLayout { arm: Arm::Bottom, inbound: 0, outbound: 2, centre: 0, next: Arm::Left },
];

/// Arm of each seat, in `PLAYER_COLOURS` order
const SEAT_ARMS: [Arm; 4] = [Arm::Left, Arm::Bottom, Arm::Top, Arm::Right];

fn layout(arm: Arm) -> &'static ArmLayout {
    &ARM_LAYOUTS[arm.index()]
}

impl Board {
    /// Build the fixed 72-tile graph
    pub fn build() -> Self {
        let mut tiles: Vec<Tile> = (0..TILE_COUNT as u8)
            .map(|raw| Tile::blank(TileId(raw).coord()))
            .collect();
        let mut specials = Vec::with_capacity(4);

        for layout in &ARM_LAYOUTS {
            let arm = layout.arm;
            let colour = arm.colour();
            let junction = layout.junction();
            let next_entry = self::layout(layout.next).entry();

            for index in 0..CELLS_PER_LANE {
                let outbound = TileId::new(arm, layout.outbound, index);
                tiles[outbound.index()].next = Some(match layout.outward(index) {
                    Some(n) => TileId::new(arm, layout.outbound, n),
                    None => junction,
                });

                let inbound = TileId::new(arm, layout.inbound, index);
                tiles[inbound.index()].next = Some(match layout.inward(index) {
                    Some(n) => TileId::new(arm, layout.inbound, n),
                    None => next_entry,
                });

                let home = &mut tiles[TileId::new(arm, HOME_LANE, index).index()];
                home.owner = colour;
                home.paint = colour;
                home.next = layout
                    .inward(index)
                    .map(|n| TileId::new(arm, HOME_LANE, n));
            }

            let ring_default = TileId::new(arm, layout.inbound, layout.outer());
            let tile = &mut tiles[junction.index()];
            tile.paint = Colour::Neutral;
            tile.next = Some(ring_default);
            tile.ring_next = Some(ring_default);
            specials.push(junction);
        }

        let routes = SEAT_ARMS.map(|arm| {
            let route = arm_route(layout(arm));
            tiles[route.start.index()].paint = route.colour;
            route
        });

        tracing::debug!(tiles = tiles.len(), specials = specials.len(), "board built");

        Self { tiles, specials, routes }
    }

    /// Check the structural invariants of the graph
    ///
    /// The fixed topology always passes; this exists for tests and the
    /// `board --check` command.
    pub fn validate(&self) -> Result<(), TopologyError> {
        if self.specials.len() != 4 {
            return Err(TopologyError::JunctionCount { found: self.specials.len() });
        }
        self.check_ring()?;
        for route in &self.routes {
            self.check_redirect(route)?;
            self.check_route(route.colour)?;
        }
        Ok(())
    }

    /// Ring defaults from any starting tile form one cycle of RING_LENGTH
    fn check_ring(&self) -> Result<(), TopologyError> {
        let start = self.routes[0].start;
        let mut seen = FxHashSet::default();
        let mut current = start;
        loop {
            if !seen.insert(current) {
                return Err(TopologyError::RingLength { found: seen.len() });
            }
            let tile = self.tile(current);
            current = match tile.ring_next.or(tile.next) {
                Some(next) => next,
                None => return Err(TopologyError::RingLength { found: seen.len() }),
            };
            if current == start {
                break;
            }
        }
        if seen.len() != RING_LENGTH {
            return Err(TopologyError::RingLength { found: seen.len() });
        }
        match self.routes.iter().find(|route| !seen.contains(&route.start)) {
            Some(route) => Err(TopologyError::StartOffRing { colour: route.colour }),
            None => Ok(()),
        }
    }

    /// The redirect target leads straight down a finite private chain
    fn check_redirect(&self, route: &ColourRoute) -> Result<(), TopologyError> {
        let junction = self.tile(route.junction);
        let entry = self.tile(route.stretch_entry);
        if !junction.is_junction()
            || junction.owner != route.colour
            || entry.owner != route.colour
            || entry.coord.arm != junction.coord.arm
        {
            return Err(TopologyError::BadRedirect { junction: route.junction });
        }

        let mut length = 0;
        let mut current = Some(route.stretch_entry);
        while let Some(id) = current {
            let tile = self.tile(id);
            if tile.is_junction() || tile.owner != route.colour || length > STRETCH_LENGTH {
                return Err(TopologyError::BadRedirect { junction: route.junction });
            }
            length += 1;
            current = tile.next;
        }
        if length != STRETCH_LENGTH {
            return Err(TopologyError::BadRedirect { junction: route.junction });
        }
        Ok(())
    }

    /// Following the colour's successors from its start reaches the finish
    fn check_route(&self, colour: Colour) -> Result<(), TopologyError> {
        let Some(route) = self.route(colour) else {
            return Ok(());
        };
        let mut seen = FxHashSet::default();
        let mut current = route.start;
        for _ in 0..MAX_ROUTE_STEPS {
            if !seen.insert(current) {
                return Err(TopologyError::Cycle { colour, tile: current });
            }
            let next = if current == route.junction {
                Some(route.stretch_entry)
            } else {
                self.successor(current, colour)
            };
            match next {
                Some(tile) => current = tile,
                None => return Ok(()),
            }
        }
        Err(TopologyError::Unterminated { colour, steps: MAX_ROUTE_STEPS })
    }
}

/// Start, junction and stretch entry of the colour owning an arm
///
/// Both the starting tile and the stretch entry sit one cell in from the
/// board edge.
fn arm_route(layout: &ArmLayout) -> ColourRoute {
    let outer = layout.outer();
    let first_in = layout.inward(outer).unwrap_or(outer);
    ColourRoute {
        colour: layout.arm.colour(),
        start: TileId::new(layout.arm, layout.inbound, first_in),
        junction: layout.junction(),
        stretch_entry: TileId::new(layout.arm, HOME_LANE, first_in),
    }
}
