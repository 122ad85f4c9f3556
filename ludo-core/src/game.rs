//! Game state and turn progression

use crate::board::{Board, TileId};
use crate::colour::{Colour, PLAYER_COLOURS};
use crate::config::GameConfig;
use crate::dice::{Dice, Roll, RollAnimation};
use crate::error::{ConfigError, MoveError};
use crate::movement::{self, MoveOutcome};
use crate::token::{Token, TokenRef, TOKENS_PER_HOME};

// ============================================================================
// HOMES
// ============================================================================

/// A colour's home and the four tokens it owns
#[derive(Clone, Debug)]
pub struct Home {
    pub colour: Colour,
    /// Display name; differs from the colour with fewer than four players
    pub name: String,
    pub starting_tile: TileId,
    tokens: [Token; TOKENS_PER_HOME],
}

impl Home {
    fn new(colour: Colour, name: &str, starting_tile: TileId) -> Self {
        Self {
            colour,
            name: name.to_string(),
            starting_tile,
            tokens: std::array::from_fn(|slot| Token::new(colour, slot as u8)),
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn token(&self, slot: u8) -> Option<&Token> {
        self.tokens.get(slot as usize)
    }

    pub fn all_finished(&self) -> bool {
        self.tokens.iter().all(Token::is_finished)
    }
}

// ============================================================================
// GAME STATE
// ============================================================================

/// Board, homes, turn order and the committed roll
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    /// Indexed by `Colour::seat`
    homes: [Home; 4],
    active: Vec<Colour>,
    current: usize,
    dice: Dice,
    roll: Option<Roll>,
}

impl Game {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Build the board and seat the players
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        let lineup = config.lineup()?;
        let board = Board::build();

        let homes = PLAYER_COLOURS.map(|colour| {
            let seat = colour.seat().unwrap_or_default();
            let start = board.routes()[seat].start;
            Home::new(colour, lineup.home_names[seat], start)
        });

        let dice = match config.seed {
            Some(seed) => Dice::new(seed),
            None => Dice::from_entropy(),
        };

        tracing::info!(players = config.players, seed = dice.seed(), "new game");

        Ok(Self {
            board,
            homes,
            active: lineup.active.to_vec(),
            current: 0,
            dice,
            roll: None,
        })
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Colour {
        self.active[self.current]
    }

    /// Colours taking turns, in order
    pub fn active_colours(&self) -> &[Colour] {
        &self.active
    }

    pub fn is_active(&self, colour: Colour) -> bool {
        self.active.contains(&colour)
    }

    pub fn homes(&self) -> &[Home; 4] {
        &self.homes
    }

    pub fn home(&self, colour: Colour) -> Option<&Home> {
        colour.seat().map(|seat| &self.homes[seat])
    }

    pub fn token(&self, token: TokenRef) -> Option<&Token> {
        self.home(token.colour)?.token(token.slot)
    }

    /// Iterate every token of every home
    pub fn tokens(&self) -> impl Iterator<Item = &Token> + '_ {
        self.homes.iter().flat_map(|home| home.tokens.iter())
    }

    /// Committed roll waiting to be used
    pub fn pending_roll(&self) -> Option<Roll> {
        self.roll
    }

    pub fn dice_seed(&self) -> u64 {
        self.dice.seed()
    }

    /// First active colour with all four tokens finished
    pub fn winner(&self) -> Option<Colour> {
        self.active
            .iter()
            .copied()
            .find(|&colour| self.home(colour).is_some_and(Home::all_finished))
    }

    // ========================================================================
    // ACTIONS
    // ========================================================================

    /// Roll the dice and commit the result, replacing any unused roll
    pub fn roll(&mut self) -> RollAnimation {
        let animation = self.dice.animate();
        self.commit_roll(animation.committed);
        animation
    }

    /// Commit a roll produced elsewhere
    pub fn commit_roll(&mut self, roll: Roll) {
        tracing::debug!(player = %self.current_player(), %roll, "roll committed");
        self.roll = Some(roll);
    }

    /// Put a home token on its starting tile, using up the turn
    pub fn release(&mut self, token: TokenRef) -> Result<TileId, MoveError> {
        self.check_turn(token)?;
        if self.roll.is_none() {
            return Err(MoveError::NoRoll);
        }
        let (board, slot) = self.token_slot(token)?;
        let tile = movement::release(board, slot)?;
        self.end_turn();
        Ok(tile)
    }

    /// Move a token on the board by the committed roll, using up the turn
    pub fn move_token(&mut self, token: TokenRef) -> Result<MoveOutcome, MoveError> {
        self.check_turn(token)?;
        let roll = self.roll.ok_or(MoveError::NoRoll)?;
        let (board, slot) = self.token_slot(token)?;
        if slot.tile().is_none() {
            return Err(MoveError::NotOnBoard(token));
        }
        let outcome = movement::advance(board, slot, roll.steps())?;
        self.end_turn();
        Ok(outcome)
    }

    // ========================================================================
    // TURN HELPERS
    // ========================================================================

    fn check_turn(&self, token: TokenRef) -> Result<(), MoveError> {
        if !self.is_active(token.colour) {
            tracing::warn!(%token, "token of inactive colour");
            return Err(MoveError::NotInPlay(token.colour));
        }
        let current = self.current_player();
        if token.colour != current {
            tracing::warn!(%token, %current, "token moved out of turn");
            return Err(MoveError::NotYourTurn { token, current });
        }
        Ok(())
    }

    /// Board and token borrowed together
    fn token_slot(&mut self, token: TokenRef) -> Result<(&mut Board, &mut Token), MoveError> {
        let seat = token.colour.seat().ok_or(MoveError::NotInPlay(token.colour))?;
        let slot = self.homes[seat]
            .tokens
            .get_mut(token.slot as usize)
            .ok_or(MoveError::UnknownToken(token))?;
        Ok((&mut self.board, slot))
    }

    fn end_turn(&mut self) {
        self.roll = None;
        self.current = (self.current + 1) % self.active.len();
        tracing::debug!(next = %self.current_player(), "turn passed");
    }
}
