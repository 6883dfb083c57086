//! Construction parameters for a [`SkipList`][crate::SkipList].

use std::{fmt, str::FromStr};

use crate::error::SkipListError;

/// The largest number of levels a skiplist may have.
///
/// Levels are drawn from the leading zeros of a 32-bit random draw, so more
/// than 32 levels could never be populated.
pub const MAX_LEVELS: usize = 32;

/// The number of levels used when none is given explicitly.
pub const DEFAULT_LEVELS: usize = 16;

/// Minimum levels required for a list of size n.
#[must_use]
#[inline]
pub fn levels_required(n: usize) -> usize {
    if n == 0 {
        1
    } else {
        let bits = usize::BITS - n.leading_zeros();
        usize::try_from(bits).map_or(MAX_LEVELS, |bits| bits.min(MAX_LEVELS))
    }
}

/// How the skiplist treats a value that compares equal to one already stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Policy {
    /// Equal values are all kept, in insertion order.
    #[default]
    AllowDuplicates,
    /// Inserting a value equal to a stored one leaves the list untouched.
    UniqueSet,
}

impl FromStr for Policy {
    type Err = SkipListError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "duplicates" | "allow-duplicates" | "allow_duplicates" => Ok(Self::AllowDuplicates),
            "unique" | "set" | "unique-set" | "unique_set" => Ok(Self::UniqueSet),
            _ => Err(SkipListError::UnknownPolicy(s.to_owned())),
        }
    }
}

impl fmt::Display for Policy {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::AllowDuplicates => f.write_str("allow-duplicates"),
            Self::UniqueSet => f.write_str("unique-set"),
        }
    }
}

/// Parameters fixed for the lifetime of a skiplist.
///
/// ```
/// use ranked_skiplist::{Config, Policy};
///
/// let config = Config::default().with_max_levels(8).with_policy(Policy::UniqueSet);
/// assert!(config.validate().is_ok());
/// assert!(Config::default().with_max_levels(0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Number of levels of the head node, in `[1, MAX_LEVELS]`.
    pub max_levels: usize,
    /// Duplicate handling.
    pub policy: Policy,
}

impl Default for Config {
    #[inline]
    fn default() -> Self {
        Self {
            max_levels: DEFAULT_LEVELS,
            policy: Policy::AllowDuplicates,
        }
    }
}

impl Config {
    /// A configuration sized for roughly `capacity` elements, so that only a
    /// few nodes are expected to reach the highest level.
    #[inline]
    #[must_use]
    pub fn for_capacity(capacity: usize) -> Self {
        Self {
            max_levels: levels_required(capacity),
            ..Self::default()
        }
    }

    /// Replace the number of levels.
    #[inline]
    #[must_use]
    pub fn with_max_levels(self, max_levels: usize) -> Self {
        Self { max_levels, ..self }
    }

    /// Replace the duplicate policy.
    #[inline]
    #[must_use]
    pub fn with_policy(self, policy: Policy) -> Self {
        Self { policy, ..self }
    }

    /// Check that the configuration can be used to build a skiplist.
    ///
    /// # Errors
    ///
    /// [`SkipListError::ZeroLevels`] if `max_levels` is zero, and
    /// [`SkipListError::TooManyLevels`] if it exceeds [`MAX_LEVELS`].
    #[inline]
    pub fn validate(&self) -> Result<(), SkipListError> {
        validate_levels(self.max_levels)
    }
}

/// Shared bounds check for anything sized by a level count.
pub(crate) fn validate_levels(levels: usize) -> Result<(), SkipListError> {
    if levels == 0 {
        return Err(SkipListError::ZeroLevels);
    }
    if levels > MAX_LEVELS {
        return Err(SkipListError::TooManyLevels(levels));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::{Config, DEFAULT_LEVELS, MAX_LEVELS, Policy, levels_required};
    use crate::error::{ErrorKind, SkipListError};

    #[test]
    fn test_level_required() {
        assert_eq!(levels_required(0), 1);
        assert_eq!(levels_required(1), 1);
        assert_eq!(levels_required(2), 2);
        assert_eq!(levels_required(3), 2);
        assert_eq!(levels_required(1023), 10);
        assert_eq!(levels_required(1024), 11);
        assert_eq!(levels_required(usize::MAX), MAX_LEVELS);
    }

    #[test]
    fn default() {
        let config = Config::default();
        assert_eq!(config.max_levels, DEFAULT_LEVELS);
        assert_eq!(config.policy, Policy::AllowDuplicates);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn for_capacity() {
        assert_eq!(Config::for_capacity(100).max_levels, 7);
        assert_eq!(Config::for_capacity(0).max_levels, 1);
    }

    #[rstest]
    #[case(0)]
    #[case(33)]
    #[case(1024)]
    fn invalid_levels(#[case] levels: usize) {
        let err = Config::default()
            .with_max_levels(levels)
            .validate()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[rstest]
    #[case(1)]
    #[case(16)]
    #[case(32)]
    fn valid_levels(#[case] levels: usize) {
        assert!(Config::default().with_max_levels(levels).validate().is_ok());
    }

    #[rstest]
    #[case("duplicates", Policy::AllowDuplicates)]
    #[case("Allow-Duplicates", Policy::AllowDuplicates)]
    #[case("unique", Policy::UniqueSet)]
    #[case(" set ", Policy::UniqueSet)]
    #[case("unique_set", Policy::UniqueSet)]
    fn parse_policy(#[case] text: &str, #[case] expected: Policy) -> Result<()> {
        assert_eq!(text.parse::<Policy>()?, expected);
        Ok(())
    }

    #[test]
    fn parse_unknown_policy() {
        let err = "bag".parse::<Policy>().unwrap_err();
        assert!(matches!(err, SkipListError::UnknownPolicy(ref s) if s == "bag"));
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn policy_display_round_trips() -> Result<()> {
        for policy in [Policy::AllowDuplicates, Policy::UniqueSet] {
            assert_eq!(policy.to_string().parse::<Policy>()?, policy);
        }
        Ok(())
    }
}
