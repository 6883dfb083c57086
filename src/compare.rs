//! Orderings used to keep the skiplist sorted.

use std::cmp::Ordering;

/// A total order over `T`.
///
/// The ordering **must** be well-behaved. Specifically, given some ordering
/// function `f(a, b)`, it must satisfy the following properties:
///
/// - Be well defined: `f(a, b)` should always return the same value
/// - Be anti-symmetric: `f(a, b) == Greater` if and only if `f(b, a) ==
///   Less`, and `f(a, b) == Equal == f(b, a)`.
/// - By transitive: If `f(a, b) == Greater` and `f(b, c) == Greater` then
///   `f(a, c) == Greater`.
///
/// Failure to satisfy these properties will not cause memory unsafety, but
/// lookups, removals and the order of iteration become unspecified.
///
/// Any `Fn(&T, &T) -> Ordering` closure is a comparator:
///
/// ```
/// use ranked_skiplist::Compare;
///
/// let reverse = |a: &u32, b: &u32| b.cmp(a);
/// assert_eq!(reverse.compare(&1, &2), std::cmp::Ordering::Greater);
/// ```
pub trait Compare<T: ?Sized> {
    /// Compare `a` against `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// The comparator given by `T`'s own [`Ord`] implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Compare<T> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T: ?Sized, F> Compare<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use pretty_assertions::assert_eq;

    use super::{Compare, NaturalOrder};

    #[test]
    fn natural_order() {
        assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
        assert_eq!(NaturalOrder.compare("b", "a"), Ordering::Greater);
        assert_eq!(NaturalOrder.compare(&7_u8, &7_u8), Ordering::Equal);
    }

    #[test]
    fn closure() {
        // Even numbers sort before odd ones.
        let parity = |a: &u64, b: &u64| (a % 2).cmp(&(b % 2)).then(a.cmp(b));
        assert_eq!(parity.compare(&3, &2), Ordering::Greater);
        assert_eq!(parity.compare(&4, &2), Ordering::Greater);
        assert_eq!(parity.compare(&4, &5), Ordering::Less);
    }
}
