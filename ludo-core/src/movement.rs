//! Token movement engine
//!
//! Walks a token along the tile graph one link per step. Every cell the token
//! stands on during a walk, including the ones it only passes through, counts
//! as occupied for that step, so a token crossing its own junction triggers
//! the redirect into its home stretch.

use serde::{Deserialize, Serialize};

use crate::board::{Board, TileId};
use crate::error::MoveError;
use crate::token::{Token, TokenPosition, TokenRef};

/// Smallest accepted step count
pub const MIN_STEPS: u8 = 1;

/// Largest accepted step count (one die face)
pub const MAX_STEPS: u8 = 6;

/// Result of a successful walk
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub token: TokenRef,
    pub from: TokenPosition,
    pub to: TokenPosition,
    /// Links actually followed (less than requested if the token finished)
    pub links_followed: u8,
    /// Junctions rerouted during this walk
    pub redirected: Vec<TileId>,
}

/// Place a token waiting at home on its colour's starting tile
pub fn release(board: &mut Board, token: &mut Token) -> Result<TileId, MoveError> {
    if !token.is_home() {
        return Err(MoveError::AlreadyReleased(token.id()));
    }
    let start = board
        .starting_tile(token.colour)
        .ok_or(MoveError::NotInPlay(token.colour))?;

    board.occupy(start, token.id());
    token.position = TokenPosition::OnTile(start);
    tracing::debug!(token = %token.id(), tile = %start, "token released");
    Ok(start)
}

/// Advance a token by `steps` links
///
/// A token at home or already finished does not move. The walk stops early
/// when the token runs off the end of its home stretch.
pub fn advance(board: &mut Board, token: &mut Token, steps: u8) -> Result<MoveOutcome, MoveError> {
    if !(MIN_STEPS..=MAX_STEPS).contains(&steps) {
        tracing::warn!(token = %token.id(), steps, "rejected move with invalid step count");
        return Err(MoveError::InvalidSteps { steps });
    }

    let me = token.id();
    let from = token.position;
    let mut links_followed = 0;
    let mut redirected = Vec::new();

    for _ in 0..steps {
        let TokenPosition::OnTile(tile) = token.position else {
            break;
        };

        token.out_of_home = true;
        board.occupy(tile, me);
        if board.redirect(tile, token.colour) {
            redirected.push(tile);
        }
        let next = board.successor(tile, token.colour);
        board.leave(tile, me);
        links_followed += 1;

        match next {
            Some(next) => token.position = TokenPosition::OnTile(next),
            None => {
                token.position = TokenPosition::Finished;
                break;
            }
        }
    }

    if let TokenPosition::OnTile(rest) = token.position {
        board.occupy(rest, me);
    }

    tracing::debug!(token = %me, %from, to = %token.position, links_followed, "token moved");

    Ok(MoveOutcome {
        token: me,
        from,
        to: token.position,
        links_followed,
        redirected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Arm;
    use crate::colour::{Colour, PLAYER_COLOURS};
    use proptest::prelude::*;

    fn released(board: &mut Board, colour: Colour) -> Token {
        let mut token = Token::new(colour, 0);
        release(board, &mut token).unwrap();
        token
    }

    /// Walk `steps` links in chunks of at most six
    fn walk(board: &mut Board, token: &mut Token, mut steps: usize) {
        while steps > 0 {
            let chunk = steps.min(MAX_STEPS as usize) as u8;
            advance(board, token, chunk).unwrap();
            steps -= chunk as usize;
        }
    }

    #[test]
    fn test_release_places_on_start() {
        let mut board = Board::build();
        let token = released(&mut board, Colour::Green);
        let start = TileId::new(Arm::Left, 0, 1);
        assert_eq!(token.position, TokenPosition::OnTile(start));
        assert_eq!(board.occupant(start), Some(token.id()));
        assert!(!token.out_of_home);
    }

    #[test]
    fn test_release_twice_rejected() {
        let mut board = Board::build();
        let mut token = released(&mut board, Colour::Red);
        assert_eq!(
            release(&mut board, &mut token),
            Err(MoveError::AlreadyReleased(token.id()))
        );
    }

    #[test]
    fn test_green_moves_four() {
        let mut board = Board::build();
        let mut token = released(&mut board, Colour::Green);
        let start = board.starting_tile(Colour::Green).unwrap();

        let mut expected = start;
        for _ in 0..4 {
            expected = board.next(expected).unwrap();
        }

        let outcome = advance(&mut board, &mut token, 4).unwrap();
        assert_eq!(outcome.links_followed, 4);
        assert_eq!(token.position, TokenPosition::OnTile(expected));
        assert_eq!(expected, TileId::new(Arm::Left, 0, 5));
        assert!(token.out_of_home);
        assert_eq!(board.occupant(expected), Some(token.id()));
        assert_eq!(board.occupant(start), None);
    }

    #[test]
    fn test_invalid_steps_rejected() {
        let mut board = Board::build();
        let mut token = released(&mut board, Colour::Yellow);
        let before = token.position;

        assert_eq!(advance(&mut board, &mut token, 0), Err(MoveError::InvalidSteps { steps: 0 }));
        assert_eq!(advance(&mut board, &mut token, 7), Err(MoveError::InvalidSteps { steps: 7 }));
        assert_eq!(token.position, before);
        assert!(!token.out_of_home);
        assert_eq!(board.occupant(before.tile().unwrap()), Some(token.id()));
    }

    #[test]
    fn test_home_token_stays_home() {
        let mut board = Board::build();
        let mut token = Token::new(Colour::Blue, 2);
        let outcome = advance(&mut board, &mut token, 6).unwrap();
        assert_eq!(outcome.links_followed, 0);
        assert!(token.is_home());
        assert!(!token.out_of_home);
    }

    #[test]
    fn test_blue_junction_redirect() {
        let mut board = Board::build();
        let junction = TileId::new(Arm::Right, 1, 5);
        let entry = TileId::new(Arm::Right, 1, 4);
        let ring_default = TileId::new(Arm::Right, 2, 5);

        let mut blue = Token::new(Colour::Blue, 0);
        blue.position = TokenPosition::OnTile(junction);
        let outcome = advance(&mut board, &mut blue, 1).unwrap();

        assert_eq!(outcome.redirected, vec![junction]);
        assert_eq!(board.next(junction), Some(entry));
        assert_eq!(blue.position, TokenPosition::OnTile(entry));

        // Yellow lands on the same junction and keeps to the ring
        let mut yellow = Token::new(Colour::Yellow, 0);
        yellow.position = TokenPosition::OnTile(TileId::new(Arm::Right, 0, 5));
        advance(&mut board, &mut yellow, 1).unwrap();
        assert_eq!(yellow.position, TokenPosition::OnTile(junction));
        assert_eq!(board.occupant(junction), Some(yellow.id()));

        let outcome = advance(&mut board, &mut yellow, 1).unwrap();
        assert!(outcome.redirected.is_empty());
        assert_eq!(board.next(junction), Some(entry));
        assert_eq!(yellow.position, TokenPosition::OnTile(ring_default));
    }

    #[test]
    fn test_junction_idempotent() {
        let mut board = Board::build();
        let junction = TileId::new(Arm::Top, 1, 5);
        assert!(board.redirect(junction, Colour::Red));
        let after_first = board.next(junction);
        assert!(!board.redirect(junction, Colour::Red));
        assert_eq!(board.next(junction), after_first);
        assert_eq!(after_first, Some(TileId::new(Arm::Top, 1, 4)));
    }

    #[test]
    fn test_colour_isolation() {
        let mut board = Board::build();
        let junctions = board.specials().to_vec();
        for junction in junctions {
            let owner = board.tile(junction).owner;
            let before = board.next(junction);
            for colour in PLAYER_COLOURS.iter().filter(|&&c| c != owner) {
                assert!(!board.redirect(junction, *colour));
                assert_eq!(board.next(junction), before);
            }
        }
    }

    #[test]
    fn test_passing_through_junction_redirects() {
        let mut board = Board::build();
        let junction = TileId::new(Arm::Left, 1, 0);
        let mut green = Token::new(Colour::Green, 1);
        green.position = TokenPosition::OnTile(TileId::new(Arm::Left, 2, 1));

        let outcome = advance(&mut board, &mut green, 4).unwrap();
        assert_eq!(outcome.redirected, vec![junction]);
        assert_eq!(board.next(junction), Some(TileId::new(Arm::Left, 1, 1)));
        assert_eq!(green.position, TokenPosition::OnTile(TileId::new(Arm::Left, 1, 2)));
        assert_eq!(board.occupant(junction), None);
    }

    #[test]
    fn test_full_route_finishes() {
        for colour in PLAYER_COLOURS {
            let mut board = Board::build();
            let mut token = released(&mut board, colour);
            walk(&mut board, &mut token, 58);
            assert!(token.is_finished(), "{} did not finish", colour);
        }
    }

    #[test]
    fn test_finish_stops_early() {
        let mut board = Board::build();
        let mut token = Token::new(Colour::Red, 3);
        token.position = TokenPosition::OnTile(TileId::new(Arm::Top, 1, 1));
        let outcome = advance(&mut board, &mut token, 6).unwrap();
        assert_eq!(outcome.links_followed, 2);
        assert_eq!(outcome.to, TokenPosition::Finished);

        let outcome = advance(&mut board, &mut token, 3).unwrap();
        assert_eq!(outcome.links_followed, 0);
        assert!(token.is_finished());
    }

    #[test]
    fn test_landing_overwrites_occupant() {
        let mut board = Board::build();
        let mut first = released(&mut board, Colour::Green);
        advance(&mut board, &mut first, 2).unwrap();
        let target = first.tile().unwrap();

        let mut second = Token::new(Colour::Green, 1);
        release(&mut board, &mut second).unwrap();
        advance(&mut board, &mut second, 2).unwrap();

        // No capture: both share the tile, the newcomer is recorded
        assert_eq!(first.tile(), Some(target));
        assert_eq!(second.tile(), Some(target));
        assert_eq!(board.occupant(target), Some(second.id()));
    }

    #[test]
    fn test_leaving_shared_tile_uncovers_earlier_token() {
        let mut board = Board::build();
        let mut first = released(&mut board, Colour::Green);
        advance(&mut board, &mut first, 2).unwrap();
        let shared = first.tile().unwrap();

        let mut second = Token::new(Colour::Green, 1);
        release(&mut board, &mut second).unwrap();
        advance(&mut board, &mut second, 2).unwrap();
        assert_eq!(board.occupant(shared), Some(second.id()));

        advance(&mut board, &mut second, 1).unwrap();
        assert_eq!(first.tile(), Some(shared));
        assert_eq!(board.occupant(shared), Some(first.id()));
        assert_eq!(board.occupant(second.tile().unwrap()), Some(second.id()));
    }

    #[test]
    fn test_passing_through_keeps_occupant() {
        let mut board = Board::build();
        let mut resting = released(&mut board, Colour::Green);
        advance(&mut board, &mut resting, 2).unwrap();
        let middle = resting.tile().unwrap();

        let mut passer = Token::new(Colour::Green, 1);
        release(&mut board, &mut passer).unwrap();
        advance(&mut board, &mut passer, 4).unwrap();

        assert_eq!(board.occupant(middle), Some(resting.id()));
    }

    proptest! {
        #[test]
        fn prop_walk_stays_on_graph(
            colour_idx in 0usize..4,
            rolls in proptest::collection::vec(1u8..=6, 1..40),
        ) {
            let colour = PLAYER_COLOURS[colour_idx];
            let mut board = Board::build();
            let mut token = Token::new(colour, 0);
            release(&mut board, &mut token).unwrap();
            let route = board.route_of(colour).unwrap();

            let mut walked = 0usize;
            for steps in rolls {
                let outcome = advance(&mut board, &mut token, steps).unwrap();
                walked += outcome.links_followed as usize;
                match token.position {
                    TokenPosition::OnTile(tile) => {
                        prop_assert!(tile.index() < crate::board::TILE_COUNT);
                        prop_assert_eq!(tile, route[walked]);
                    }
                    TokenPosition::Finished => prop_assert_eq!(walked, route.len()),
                    TokenPosition::Home => prop_assert!(false, "token went back home"),
                }
            }
        }

        #[test]
        fn prop_out_of_range_steps_rejected(steps in 7u8..=255) {
            let mut board = Board::build();
            let mut token = Token::new(Colour::Green, 0);
            release(&mut board, &mut token).unwrap();
            let before = token.position;
            prop_assert_eq!(
                advance(&mut board, &mut token, steps),
                Err(MoveError::InvalidSteps { steps })
            );
            prop_assert_eq!(token.position, before);
        }
    }
}
