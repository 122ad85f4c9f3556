//! Two-die roller
//!
//! Rolls are drawn from a seeded ChaCha8 stream so games replay exactly. The
//! animation frames exist for front ends that want to flicker the dice
//! faces; only the committed roll carries game authority.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Faces per die
pub const FACES: u8 = 6;

/// Time between animation frames
pub const FRAME_INTERVAL_MS: u64 = 10;

/// Time until the committed roll is shown
pub const ROLL_DURATION_MS: u64 = 500;

/// Frames shown before the roll is committed
pub const ANIMATION_FRAMES: usize = (ROLL_DURATION_MS / FRAME_INTERVAL_MS) as usize;

/// A pair of die faces, each in 1..=6
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roll {
    first: u8,
    second: u8,
}

impl Roll {
    /// None if either face is outside 1..=6
    pub fn new(first: u8, second: u8) -> Option<Self> {
        let valid = |face: u8| (1..=FACES).contains(&face);
        (valid(first) && valid(second)).then_some(Self { first, second })
    }

    pub fn first(&self) -> u8 {
        self.first
    }

    pub fn second(&self) -> u8 {
        self.second
    }

    /// Steps a token moves for this roll (the first die)
    pub fn steps(&self) -> u8 {
        self.first
    }

    pub fn total(&self) -> u8 {
        self.first + self.second
    }
}

impl fmt::Display for Roll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}", self.first, self.second)
    }
}

/// Frames to flash followed by the roll that counts
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RollAnimation {
    pub frames: Vec<Roll>,
    pub committed: Roll,
}

/// Seeded dice
#[derive(Clone, Debug)]
pub struct Dice {
    rng: ChaCha8Rng,
    seed: u64,
}

impl Dice {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Dice with a random seed
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn roll(&mut self) -> Roll {
        Roll {
            first: self.rng.gen_range(1..=FACES),
            second: self.rng.gen_range(1..=FACES),
        }
    }

    /// Commit a roll, then generate the frames shown while it "spins"
    pub fn animate(&mut self) -> RollAnimation {
        let committed = self.roll();
        let frames = (0..ANIMATION_FRAMES).map(|_| self.roll()).collect();
        RollAnimation { frames, committed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolls_in_range() {
        let mut dice = Dice::new(7);
        for _ in 0..1000 {
            let roll = dice.roll();
            assert!((1..=6).contains(&roll.first()));
            assert!((1..=6).contains(&roll.second()));
        }
    }

    #[test]
    fn test_same_seed_same_rolls() {
        let mut a = Dice::new(42);
        let mut b = Dice::new(42);
        for _ in 0..20 {
            assert_eq!(a.roll(), b.roll());
        }
        assert_eq!(a.seed(), 42);
    }

    #[test]
    fn test_animation_frames() {
        let mut dice = Dice::new(1);
        let animation = dice.animate();
        assert_eq!(animation.frames.len(), 50);
        assert!(Roll::new(animation.committed.first(), animation.committed.second()).is_some());
    }

    #[test]
    fn test_roll_validation() {
        assert!(Roll::new(1, 6).is_some());
        assert!(Roll::new(0, 3).is_none());
        assert!(Roll::new(3, 7).is_none());
        let roll = Roll::new(4, 5).unwrap();
        assert_eq!(roll.steps(), 4);
        assert_eq!(roll.total(), 9);
    }
}
