//! RNG module - uniform random piece sampling
//!
//! Every draw is independent and uniform over the seven kinds. There is no
//! 7-bag: repeats and droughts are possible, as in the classic game.
//!
//! A small seeded LCG keeps sessions reproducible for tests and replays of a
//! seed.

use crate::types::PieceKind;

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
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Uniform value in `[0, max)`.
    ///
    /// Uses the high bits (multiply-shift); the low bits of an LCG cycle with
    /// short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Independent uniform piece generator
#[derive(Debug, Clone)]
pub struct PieceSampler {
    rng: SimpleRng,
}

impl PieceSampler {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Draw the next piece kind
    pub fn draw(&mut self) -> PieceKind {
        let idx = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[idx]
    }

    /// Current RNG state (seeding a new sampler with it continues the sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceSampler {
    fn default() -> Self {
        Self::new(1)
    }
}
