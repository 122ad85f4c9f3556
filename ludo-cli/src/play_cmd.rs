//! Play command - interactive game on stdin
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_config(), run_session()
//! - Level 3: apply_command()
//! - Level 4: command parsing

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use ludo_core::{Colour, Game, GameConfig, TokenRef};

use crate::render;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Number of players (2-4), overrides the config file
    #[arg(long)]
    pub players: Option<u8>,

    /// Dice seed, overrides the config file
    #[arg(long)]
    pub seed: Option<u64>,

    /// Game config JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// One line of player input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    Roll,
    Release(u8),
    Move(u8),
    Board,
    Help,
    Quit,
}

const HELP: &str = "commands: roll | release <slot> | move <slot> | board | help | quit";

/// How a session ended
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    pub actions: usize,
    pub winner: Option<Colour>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs) -> Result<()> {
    let config = build_config(&args)?;
    let mut game = Game::new(&config).context("Failed to set up game")?;

    tracing::info!(
        "Starting game: {} players, dice seed {}",
        config.players,
        game.dice_seed()
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let summary = run_session(&mut game, stdin.lock(), stdout.lock())?;

    match summary.winner {
        Some(winner) => tracing::info!("{} won after {} actions", winner, summary.actions),
        None => tracing::info!("Game left unfinished after {} actions", summary.actions),
    }
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Config file first, then command-line overrides
fn build_config(args: &PlayArgs) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(players) = args.players {
        config.players = players;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    config.validate()?;
    Ok(config)
}

/// Read commands until quit, end of input or a winner
pub fn run_session<R: BufRead, W: Write>(
    game: &mut Game,
    input: R,
    mut out: W,
) -> Result<SessionSummary> {
    let mut actions = 0;
    write!(out, "{}", render::render(&game.view()))?;
    writeln!(out, "{}", HELP)?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "error: {}", e)?;
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        if apply_command(game, command, &mut out)? {
            actions += 1;
        }

        if let Some(winner) = game.winner() {
            writeln!(out, "{} wins!", winner)?;
            return Ok(SessionSummary { actions, winner: Some(winner) });
        }
    }

    Ok(SessionSummary { actions, winner: None })
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Apply one command; true if it used up a turn
fn apply_command<W: Write>(game: &mut Game, command: Command, out: &mut W) -> Result<bool> {
    let player = game.current_player();
    match command {
        Command::Roll => {
            let animation = game.roll();
            writeln!(out, "{} rolled {}", player, animation.committed)?;
            Ok(false)
        }
        Command::Release(slot) => {
            let token = TokenRef::new(player, slot);
            match game.release(token) {
                Ok(tile) => {
                    writeln!(out, "{} released at {}", token, tile)?;
                    Ok(true)
                }
                Err(e) => {
                    writeln!(out, "error: {}", e)?;
                    Ok(false)
                }
            }
        }
        Command::Move(slot) => {
            let token = TokenRef::new(player, slot);
            match game.move_token(token) {
                Ok(outcome) => {
                    writeln!(out, "{} moved {} -> {}", token, outcome.from, outcome.to)?;
                    for junction in &outcome.redirected {
                        writeln!(out, "  junction {} now leads home for {}", junction, player)?;
                    }
                    Ok(true)
                }
                Err(e) => {
                    writeln!(out, "error: {}", e)?;
                    Ok(false)
                }
            }
        }
        Command::Board => {
            write!(out, "{}", render::render(&game.view()))?;
            Ok(false)
        }
        Command::Help => {
            writeln!(out, "{}", HELP)?;
            Ok(false)
        }
        Command::Quit => Ok(false),
    }
}

// ============================================================================
// LEVEL 4 - PARSING
// ============================================================================

fn parse_command(line: &str) -> Result<Command> {
    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or_default().to_ascii_lowercase();

    let mut slot = || -> Result<u8> {
        let raw = words.next().context("missing token slot")?;
        raw.parse::<u8>()
            .with_context(|| format!("bad token slot: {}", raw))
    };

    let command = match verb.as_str() {
        "roll" | "r" => Command::Roll,
        "release" => Command::Release(slot()?),
        "move" | "m" => Command::Move(slot()?),
        "board" | "b" => Command::Board,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => bail!("unknown command: {}", other),
    };
    Ok(command)
}

// ============================================================================
// TESTS
// ============================================================================
