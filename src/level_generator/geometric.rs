//! Geometric level generator.

use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::{config::validate_levels, error::SkipListError, level_generator::LevelGenerator};

/// A level generator using a geometric distribution.
///
/// This distribution assumes that if a node is present at some level `$n$`,
/// then the probability that it is present at level `$n+1$` is some constant
/// `$p \in (0, 1)$`. This produces a geometric distribution, albeit truncated
/// at the maximum number of levels allowed.
///
/// The random number generator is seeded explicitly so that every instance is
/// reproducible on its own.
#[derive(Debug, Clone)]
pub struct Geometric {
    /// The total number of levels that are assumed to exist.
    total: usize,
    /// The probability that a node is present in the next level.
    p: f64,
    /// The random number generator.
    rng: SmallRng,
}

impl Geometric {
    /// Create a new geometric level generator with `total` number of levels,
    /// `p` as the probability that a given node is present in the next
    /// level, and `seed` for the underlying random number generator.
    ///
    /// # Errors
    ///
    /// `p` must be strictly between 0 and 1, and `total` must be in `[1, 32]`.
    #[inline]
    pub fn new(total: usize, p: f64, seed: u64) -> Result<Self, SkipListError> {
        validate_levels(total)?;
        if !(0.0 < p && p < 1.0) {
            return Err(SkipListError::InvalidProbability);
        }
        Ok(Self {
            total,
            p,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    /// The probability that a node is promoted to the next level.
    #[inline]
    #[must_use]
    pub fn p(&self) -> f64 {
        self.p
    }
}

impl LevelGenerator for Geometric {
    #[inline]
    fn total(&self) -> usize {
        self.total
    }

    #[inline]
    #[expect(clippy::float_arithmetic, reason = "Sampling the distribution")]
    fn level(&mut self) -> usize {
        let mut h = 0;
        let mut x = self.p;
        let f = 1.0 - self.rng.random::<f64>();
        while x > f && h + 1 < self.total {
            h += 1;
            x *= self.p;
        }
        h
    }
}

#[cfg(test)]
mod tests {
    use anyhow::{Result, bail};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::{Geometric, LevelGenerator};
    use crate::error::SkipListError;

    #[test]
    fn invalid_max() {
        assert!(matches!(
            Geometric::new(0, 0.5, 0),
            Err(SkipListError::ZeroLevels)
        ));
        assert!(matches!(
            Geometric::new(64, 0.5, 0),
            Err(SkipListError::TooManyLevels(64))
        ));
    }

    #[rstest]
    #[case(0.0)]
    #[case(1.0)]
    #[case(-0.5)]
    #[case(f64::NAN)]
    fn invalid_p(#[case] p: f64) {
        assert!(matches!(
            Geometric::new(1, p, 0),
            Err(SkipListError::InvalidProbability)
        ));
    }

    #[test]
    fn same_seed_same_levels() -> Result<()> {
        let mut a = Geometric::new(16, 0.5, 42)?;
        let mut b = Geometric::new(16, 0.5, 42)?;
        for _ in 0..1_000 {
            assert_eq!(a.level(), b.level());
        }
        Ok(())
    }

    #[rstest]
    fn new(
        #[values(1, 2, 16, 32)] n: usize,
        #[values(0.1, 0.5, 0.9)] p: f64,
    ) -> Result<()> {
        let mut generator = Geometric::new(n, p, 7)?;
        assert_eq!(generator.total(), n);
        assert_eq!(generator.p(), p);
        for _ in 0..100_000 {
            let level = generator.level();
            assert!((0..n).contains(&level));
        }
        // Make sure that we can produce at least one level-0 node, and one at
        // the maximum level when it is within reach.
        let mut found = false;
        for _ in 0..1_000_000 {
            if generator.level() == 0 {
                found = true;
                break;
            }
        }
        if !found {
            bail!("Failed to generate a level-0 node.");
        }

        if n <= 16 && p >= 0.5 {
            found = false;
            for _ in 0..1_000_000 {
                if generator.level() == n - 1 {
                    found = true;
                    break;
                }
            }
            if !found {
                bail!("Failed to generate a level-{} node.", n - 1);
            }
        }

        Ok(())
    }
}
