//! RNG module - deterministic randomness for tile spawning
//!
//! Spawn placement and spawn values both come from one seeded generator, so a
//! game replays identically from the same seed and the same move sequence.

use crate::types::SPAWN_FOUR_PERCENT;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales the full 32-bit output instead of taking a remainder: the low bits of
    /// an LCG cycle with very short periods, which would correlate the x and y draws
    /// of a spawn position.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Value of a freshly spawned tile: 4 with `SPAWN_FOUR_PERCENT`% probability, else 2.
    pub fn next_spawn_value(&mut self) -> u32 {
        if self.next_range(100) < SPAWN_FOUR_PERCENT {
            4
        } else {
            2
        }
    }

    /// Current generator state (reseeding with it continues the same sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
