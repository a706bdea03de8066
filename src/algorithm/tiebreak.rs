//! Injectable randomness for choosing among equally cheap seams

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Source of uniform values in `[0, 1)` consumed when seams tie
pub trait TieBreak {
    /// Draw the next value in `[0, 1)`
    fn next_unit(&mut self) -> f64;
}

impl<T: TieBreak + ?Sized> TieBreak for &mut T {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Seeded random tie-breaking for reproducible runs
pub struct SeededTieBreak {
    rng: StdRng,
}

impl SeededTieBreak {
    /// Create a deterministic tie-breaker
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl TieBreak for SeededTieBreak {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Always returns the same value
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedTieBreak {
    value: f64,
}

impl FixedTieBreak {
    /// Create a tie-breaker that always yields `value`
    pub const fn new(value: f64) -> Self {
        Self { value }
    }
}

impl TieBreak for FixedTieBreak {
    fn next_unit(&mut self) -> f64 {
        self.value
    }
}

/// Map a unit draw onto one of `count` candidates
///
/// Out-of-range draws are clamped to the first or last candidate.
/// Returns 0 when there are no candidates.
pub fn pick_index(unit: f64, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    ((unit * count as f64) as usize).min(count - 1)
}
