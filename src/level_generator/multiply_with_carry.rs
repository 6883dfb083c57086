//! Multiply-with-carry pseudo-random source.

use rand::{RngCore, rand_core::impls};

/// Initial state of the `w` lane; must never be zero.
const SEED_W: u32 = 0xcafe_f00d;
/// Initial state of the `z` lane; must never be zero.
const SEED_Z: u32 = 0xabcd_1234;

/// Marsaglia's two-lane multiply-with-carry generator.
///
/// Every instance starts from the same compile-time seed, so two skiplists
/// fed the same operations build the same structure. Each output bit is set
/// with probability close to one half.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiplyWithCarry {
    w: u32,
    z: u32,
}

impl Default for MultiplyWithCarry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl MultiplyWithCarry {
    /// A generator in its initial, fixed state.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            w: SEED_W,
            z: SEED_Z,
        }
    }
}

impl RngCore for MultiplyWithCarry {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        // Both products stay below 2^32: 36969 * 0xffff + 0xffff < u32::MAX.
        self.z = 36969 * (self.z & 0xffff) + (self.z >> 16);
        self.w = 18000 * (self.w & 0xffff) + (self.w >> 16);
        (self.z << 16).wrapping_add(self.w)
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    #[inline]
    fn fill_bytes(&mut self, dst: &mut [u8]) {
        impls::fill_bytes_via_next(self, dst);
    }
}
