//! Skiplists use a probabilistic distribution of nodes over the internal
//! levels, whereby the lowest level (level 0) contains all the nodes, and each
//! level $n > 0$ will contain a random subset of the nodes on level `n - 1`.
//!
//! Most commonly, a geometric distribution is used whereby the chance that a
//! node occupies level $n$ is $p$ times the chance of occupying level $n-1$
//! (with $0 < p < 1$).
//!
//! The default [`LeadingZeros`] generator fixes $p = 1/2$ and reads the level
//! straight off the leading zero bits of a 32-bit draw, which is both cheap and
//! fully deterministic. [`Geometric`] allows any other $p$. Custom level
//! generators can be plugged in through the [`LevelGenerator`] trait.

pub mod geometric;
pub mod leading_zeros;
pub mod multiply_with_carry;

pub use geometric::Geometric;
pub use leading_zeros::LeadingZeros;
pub use multiply_with_carry::MultiplyWithCarry;

/// Upon the insertion of a new node in the list, the node is replicated to high
/// levels with a certain probability as determined by a [`LevelGenerator`].
pub trait LevelGenerator {
    /// The total number of levels that are assumed to exist.
    #[must_use]
    fn total(&self) -> usize;

    /// Generate a random level for a new node in the range `[0, total)`.
    ///
    /// A node drawn at level `$n$` is linked into levels `$0, \dots, n$`.
    ///
    /// This function should _never_ return a level greater or equal to
    /// [`total`][LevelGenerator::total].
    #[must_use]
    fn level(&mut self) -> usize;
}
