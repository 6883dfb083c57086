//! Leading-zero level generator.

use rand::RngCore;

use crate::{
    config::validate_levels,
    error::SkipListError,
    level_generator::{LevelGenerator, MultiplyWithCarry},
};

/// A level generator reading the level off the leading zeros of a 32-bit
/// draw.
///
/// Each leading bit is zero with probability one half, so the chance that a
/// node reaches level `$n$` is `$2^{-n}$`. The result is truncated at the
/// highest level available.
#[derive(Debug, Clone)]
pub struct LeadingZeros<R = MultiplyWithCarry> {
    /// The total number of levels that are assumed to exist.
    total: usize,
    /// The random number generator.
    rng: R,
}

impl LeadingZeros {
    /// Create a new generator over `total` levels driven by a freshly seeded
    /// [`MultiplyWithCarry`].
    ///
    /// # Errors
    ///
    /// `total` must be in `[1, 32]`.
    #[inline]
    pub fn new(total: usize) -> Result<Self, SkipListError> {
        Self::with_rng(total, MultiplyWithCarry::new())
    }
}

impl<R: RngCore> LeadingZeros<R> {
    /// Create a new generator over `total` levels driven by `rng`.
    ///
    /// # Errors
    ///
    /// `total` must be in `[1, 32]`.
    #[inline]
    pub fn with_rng(total: usize, rng: R) -> Result<Self, SkipListError> {
        validate_levels(total)?;
        Ok(Self { total, rng })
    }
}

impl<R: RngCore> LevelGenerator for LeadingZeros<R> {
    #[inline]
    fn total(&self) -> usize {
        self.total
    }

    #[inline]
    fn level(&mut self) -> usize {
        let zeros = usize::try_from(self.rng.next_u32().leading_zeros()).unwrap_or(usize::MAX);
        zeros.min(self.total - 1)
    }
}
