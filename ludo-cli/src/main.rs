//! LUDO CLI - Command-line interface
//!
//! Commands:
//! - board: Print the board grid or its JSON snapshot
//! - path: Print a colour's route from start to finish
//! - play: Play a game on stdin

mod board_cmd;
mod play_cmd;
mod render;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use board_cmd::{BoardArgs, PathArgs};
use play_cmd::PlayArgs;

#[derive(Parser)]
#[command(name = "ludo")]
#[command(about = "Four-colour Ludo board engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the board
    Board(BoardArgs),
    /// Print the route a colour takes to finish
    Path(PathArgs),
    /// Play an interactive game
    Play(PlayArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging (RUST_LOG overrides, stdout stays free for the board)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Board(args) => board_cmd::run_board(args),
        Commands::Path(args) => board_cmd::run_path(args),
        Commands::Play(args) => play_cmd::run(args),
    }
}
