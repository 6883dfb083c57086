//! Errors reported by the skiplist and its collaborators.

use std::{collections::TryReserveError, io};

use thiserror::Error;

/// The coarse category an error falls into.
///
/// Every [`SkipListError`] maps onto exactly one kind, which is what callers
/// should match on when they only care about *why* an operation failed and
/// not about the details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A construction parameter, index or value was not acceptable.
    InvalidInput,
    /// Storage for a node or for the head could not be allocated.
    OutOfMemory,
    /// The diagnostic sink could not be opened or written.
    IoFailure,
}

#[derive(Error, Debug)]
/// Errors that can occur when building or using a
/// [`SkipList`][crate::SkipList].
#[expect(
    clippy::module_name_repetitions,
    reason = "Using 'Error' would be too generic and may cause confusion."
)]
#[non_exhaustive]
pub enum SkipListError {
    /// The number of levels must be non-zero.
    #[error("max levels must be non-zero.")]
    ZeroLevels,
    /// The number of levels is bounded by the width of the generator output.
    #[error("max levels must be at most 32, got {0}.")]
    TooManyLevels(usize),
    /// The promotion probability `$p$` must be in the range `$(0, 1)$`.
    #[error("p must be in (0, 1).")]
    InvalidProbability,
    /// The duplicate policy could not be parsed.
    #[error("unrecognised duplicate policy {0:?}.")]
    UnknownPolicy(String),
    /// A positional lookup went past the end of the list.
    #[error("index {index} is out of bounds for a list of length {len}.")]
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// The length of the list at the time of the request.
        len: usize,
    },
    /// The value to remove is not present.
    #[error("value is not present in the skiplist.")]
    NotFound,
    /// Allocating storage failed.
    #[error("failed to allocate skiplist storage.")]
    OutOfMemory(#[from] TryReserveError),
    /// Writing the diagnostic rendering failed.
    #[error("failed to write the skiplist rendering: {0}")]
    Io(#[from] io::Error),
}

impl SkipListError {
    /// The category of this error.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match *self {
            Self::ZeroLevels
            | Self::TooManyLevels(_)
            | Self::InvalidProbability
            | Self::UnknownPolicy(_)
            | Self::IndexOutOfBounds { .. }
            | Self::NotFound => ErrorKind::InvalidInput,
            Self::OutOfMemory(_) => ErrorKind::OutOfMemory,
            Self::Io(_) => ErrorKind::IoFailure,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::{ErrorKind, SkipListError};

    #[rstest]
    #[case(SkipListError::ZeroLevels, ErrorKind::InvalidInput)]
    #[case(SkipListError::TooManyLevels(33), ErrorKind::InvalidInput)]
    #[case(SkipListError::UnknownPolicy("bag".into()), ErrorKind::InvalidInput)]
    #[case(SkipListError::IndexOutOfBounds { index: 3, len: 3 }, ErrorKind::InvalidInput)]
    #[case(SkipListError::NotFound, ErrorKind::InvalidInput)]
    #[case(io::Error::other("disk full").into(), ErrorKind::IoFailure)]
    fn kinds(#[case] error: SkipListError, #[case] kind: ErrorKind) {
        assert_eq!(error.kind(), kind);
    }

    #[test]
    fn out_of_memory() {
        let error: SkipListError = Vec::<u64>::new()
            .try_reserve_exact(usize::MAX)
            .unwrap_err()
            .into();
        assert_eq!(error.kind(), ErrorKind::OutOfMemory);
    }

    #[test]
    fn messages() {
        assert_eq!(
            SkipListError::TooManyLevels(40).to_string(),
            "max levels must be at most 32, got 40."
        );
        assert_eq!(
            SkipListError::IndexOutOfBounds { index: 5, len: 5 }.to_string(),
            "index 5 is out of bounds for a list of length 5."
        );
    }
}
