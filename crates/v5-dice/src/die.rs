//! The ten-sided die every pool is built from.

use rand::Rng;

/// Number of faces on a V5 die.
pub const D10_SIDES: u8 = 10;

/// Roll a single d10.
pub fn roll_d10<R: Rng>(rng: &mut R) -> u8 {
    rng.random_range(1..=D10_SIDES)
}

/// Roll `count` d10s and return them sorted ascending.
pub fn roll_d10_pool<R: Rng>(rng: &mut R, count: usize) -> Vec<u8> {
    let mut dice: Vec<u8> = (0..count).map(|_| roll_d10(rng)).collect();
    dice.sort_unstable();
    dice
}
