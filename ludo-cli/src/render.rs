//! Text rendering of a `BoardView`
//!
//! Every grid cell is three characters wide. Ring tiles show `.`, painted
//! tiles show their colour letter, junctions show `*`. Tokens are drawn as
//! an upper-case colour letter and their slot, with a trailing `+` when more
//! than one token shares the cell. Tokens still at home sit in the corners
//! of their home quadrant.

use std::fmt::Write;

use ludo_core::board::GRID_SIZE;
use ludo_core::{BoardView, Colour, TokenPosition, TokenView};

/// Top-left cell of each home quadrant
fn home_origin(colour: Colour) -> Option<(u8, u8)> {
    match colour {
        Colour::Green => Some((0, 0)),
        Colour::Red => Some((9, 0)),
        Colour::Yellow => Some((0, 9)),
        Colour::Blue => Some((9, 9)),
        Colour::Neutral => None,
    }
}

/// Cell where a waiting token is drawn inside its home
fn home_spot(colour: Colour, slot: u8) -> Option<(u8, u8)> {
    const OFFSETS: [u8; 2] = [1, 4];
    let (x, y) = home_origin(colour)?;
    let slot = slot as usize % 4;
    Some((x + OFFSETS[slot % 2], y + OFFSETS[slot / 2]))
}

fn token_label(token: &TokenView, shared: bool) -> String {
    let letter = token.colour.letter().to_ascii_uppercase();
    format!("{}{}{}", letter, token.slot, if shared { '+' } else { ' ' })
}

fn render_cell(view: &BoardView, cell: (u8, u8)) -> String {
    let on_cell: Vec<&TokenView> = view.tokens_at_cell(cell).collect();
    if let Some(token) = on_cell.last() {
        return token_label(token, on_cell.len() > 1);
    }

    if let Some(tile) = view.tile_at_cell(cell) {
        let mark = if tile.junction { '*' } else { tile.paint.letter() };
        return format!(" {} ", mark);
    }

    let waiting = view.tokens.iter().find(|token| {
        token.position == TokenPosition::Home && home_spot(token.colour, token.slot) == Some(cell)
    });
    if let Some(token) = waiting {
        return token_label(token, false);
    }

    let (col, row) = cell;
    if (6..9).contains(&col) && (6..9).contains(&row) {
        " # ".to_string()
    } else {
        "   ".to_string()
    }
}

/// The 15x15 board
pub fn render_grid(view: &BoardView) -> String {
    let mut out = String::new();
    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            out.push_str(&render_cell(view, (col, row)));
        }
        let trimmed = out.trim_end_matches(' ').len();
        out.truncate(trimmed);
        out.push('\n');
    }
    out
}

/// Turn, roll and per-home progress
pub fn render_status(view: &BoardView) -> String {
    let mut out = String::new();
    for home in &view.homes {
        let tokens = view.tokens.iter().filter(|token| token.colour == home.colour);
        let positions: Vec<String> = tokens.map(|token| token.position.to_string()).collect();
        let marker = if home.colour == view.current_player { '>' } else { ' ' };
        let _ = writeln!(
            out,
            "{} {:<6} ({:<6}) {}",
            marker,
            home.colour,
            home.name,
            positions.join(", ")
        );
    }
    match view.roll {
        Some(roll) => {
            let _ = writeln!(out, "{} to move with {}", view.current_player, roll);
        }
        None => {
            let _ = writeln!(out, "{} to roll", view.current_player);
        }
    }
    out
}

pub fn render(view: &BoardView) -> String {
    format!("{}\n{}", render_grid(view), render_status(view))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ludo_core::{Game, GameConfig, Roll, TokenRef};

    fn game() -> Game {
        Game::new(&GameConfig::default().with_seed(4)).unwrap()
    }

    #[test]
    fn test_grid_shape() {
        let grid = render_grid(&game().view());
        assert_eq!(grid.lines().count(), 15);
        assert_eq!(grid.matches('*').count(), 4);
        assert_eq!(grid.matches(" # ").count(), 9);
    }

    #[test]
    fn test_home_tokens_drawn() {
        let grid = render_grid(&game().view());
        for label in ["G0", "G3", "Y1", "R2", "B3"] {
            assert!(grid.contains(label), "missing {}", label);
        }
    }

    #[test]
    fn test_released_token_on_start() {
        let mut game = game();
        game.commit_roll(Roll::new(1, 1).unwrap());
        game.release(TokenRef::new(Colour::Green, 0)).unwrap();
        let view = game.view();
        assert_eq!(render_cell(&view, (1, 6)), "G0 ");
        assert_eq!(render_cell(&view, (1, 1)), "   ");
    }

    #[test]
    fn test_status_marks_current_player() {
        let status = render_status(&game().view());
        assert!(status.contains("> green"));
        assert!(status.contains("green to roll"));
    }
}
