//! Board and path commands - inspect the tile graph
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run_board(), run_path() - orchestration
//! - Level 2: check_topology(), print_board()
//! - Level 3: (delegated to ludo-core)
//! - Level 4: format_route()

use anyhow::{Context, Result};
use clap::Args;

use ludo_core::{Board, Colour, Game, GameConfig, MAX_ROUTE_STEPS, RING_LENGTH};

use crate::render;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct BoardArgs {
    /// Print the board snapshot as JSON
    #[arg(long)]
    pub json: bool,

    /// Verify the topology invariants before printing
    #[arg(long)]
    pub check: bool,
}

#[derive(Args)]
pub struct PathArgs {
    /// Colour whose route to print (green, yellow, red, blue)
    #[arg(long)]
    pub colour: Colour,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run board command
pub fn run_board(args: BoardArgs) -> Result<()> {
    let game = Game::new(&GameConfig::default().with_seed(0))?;

    if args.check {
        check_topology(game.board())?;
    }

    print_board(&game, args.json)
}

/// Run path command
pub fn run_path(args: PathArgs) -> Result<()> {
    let board = Board::build();
    let route = board
        .route_of(args.colour)
        .with_context(|| format!("{} has no route on the board", args.colour))?;

    print!("{}", format_route(args.colour, &route));
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn check_topology(board: &Board) -> Result<()> {
    board.validate().context("Board topology check failed")?;
    tracing::info!(
        "Topology ok: {} tiles, {}-tile ring, {} junctions, routes within {} steps",
        board.tiles().count(),
        RING_LENGTH,
        board.specials().len(),
        MAX_ROUTE_STEPS
    );
    Ok(())
}

fn print_board(game: &Game, json: bool) -> Result<()> {
    let view = game.view();
    if json {
        let content = serde_json::to_string_pretty(&view)?;
        println!("{}", content);
    } else {
        print!("{}", render::render_grid(&view));
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - FORMATTING
// ============================================================================

/// Route as rows of eight tile labels
fn format_route(colour: Colour, route: &[ludo_core::TileId]) -> String {
    let mut out = format!("{}: {} tiles, then finish\n", colour, route.len());
    for chunk in route.chunks(8) {
        let labels: Vec<String> = chunk.iter().map(|tile| tile.to_string()).collect();
        out.push_str("  ");
        out.push_str(&labels.join(" -> "));
        out.push('\n');
    }
    out
}

// ============================================================================
// TESTS
// ============================================================================
