//! Forward traversal over the bottom level.
//!
//! Both the [`Cursor`] and the [`Iter`] borrow the skiplist, so it cannot be
//! modified while a traversal is in progress. A new traversal can always be
//! started with [`SkipList::begin`][crate::SkipList::begin] or
//! [`SkipList::iter`][crate::SkipList::iter].

use std::{fmt, iter::FusedIterator, ptr};

use crate::skipnode::{NodeId, Storage};

// ////////////////////////////////////////////////////////////////////////////
// Cursor
// ////////////////////////////////////////////////////////////////////////////

/// A position on the bottom level of a skiplist: either an element or the
/// end.
pub struct Cursor<'a, T> {
    storage: &'a Storage<T>,
    node: Option<NodeId>,
}

impl<'a, T> Cursor<'a, T> {
    #[inline]
    pub(crate) fn new(storage: &'a Storage<T>, node: Option<NodeId>) -> Self {
        Self { storage, node }
    }

    /// Returns `true` if the cursor is past the last element.
    #[inline]
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }

    /// The element under the cursor, or `None` at the end.
    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<&'a T> {
        let storage = self.storage;
        self.node.map(|id| storage.value(id))
    }

    /// The cursor on the following element. Advancing the end cursor leaves
    /// it at the end.
    #[inline]
    #[must_use]
    #[expect(
        clippy::should_implement_trait,
        reason = "A cursor is a position, not an iterator"
    )]
    pub fn next(self) -> Self {
        Self {
            storage: self.storage,
            node: self.node.and_then(|id| self.storage.next(id)),
        }
    }
}

impl<T> Clone for Cursor<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

/// Two cursors are equal when they point at the same position of the same
/// skiplist.
impl<T> PartialEq for Cursor<'_, T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.storage, other.storage) && self.node == other.node
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Cursor<'_, T> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(value) => f.debug_tuple("Cursor").field(value).finish(),
            None => f.write_str("Cursor(end)"),
        }
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Iter
// ////////////////////////////////////////////////////////////////////////////

/// Iterator by reference, in ascending order.
pub struct Iter<'a, T> {
    cursor: Cursor<'a, T>,
    size: usize,
}

impl<'a, T> Iter<'a, T> {
    #[inline]
    pub(crate) fn new(cursor: Cursor<'a, T>, size: usize) -> Self {
        Self { cursor, size }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let value = self.cursor.value()?;
        self.cursor = self.cursor.next();
        self.size -= 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.size, Some(self.size))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            cursor: self.cursor,
            size: self.size,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::SkipList;

    #[test]
    fn cursor_on_empty_list() {
        let sl: SkipList<u8> = SkipList::new();
        let begin = sl.begin();
        assert!(begin.is_end());
        assert_eq!(begin, sl.end());
        assert_eq!(begin.value(), None);
        assert!(begin.next().is_end());
    }

    #[test]
    fn cursor_walk() {
        let sl: SkipList<_> = [30, 10, 20].into_iter().collect();
        let first = sl.begin();
        assert_eq!(first.value(), Some(&10));
        let second = first.next();
        assert_eq!(second.value(), Some(&20));
        let third = second.next();
        assert_eq!(third.value(), Some(&30));
        assert_eq!(third.next(), sl.end());
        // Cursors are plain positions; old ones stay valid.
        assert_eq!(first.value(), Some(&10));
        assert_eq!(format!("{first:?}"), "Cursor(10)");
        assert_eq!(format!("{:?}", sl.end()), "Cursor(end)");
    }

    #[test]
    fn cursors_of_different_lists_differ() {
        let a: SkipList<u8> = SkipList::new();
        let b: SkipList<u8> = SkipList::new();
        assert_ne!(a.end(), b.end());
    }

    #[test]
    fn iter() {
        let size = 10_000;

        let sl: SkipList<_> = (0..size).rev().collect();

        let mut iter = sl.iter();
        for i in 0..size {
            assert_eq!(iter.size_hint(), (size - i, Some(size - i)));
            assert_eq!(iter.next(), Some(&i));
        }
        assert_eq!(iter.size_hint(), (0, Some(0)));
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn iter_restarts() {
        let sl: SkipList<_> = (0..5).collect();
        let first: Vec<_> = sl.iter().collect();
        let second: Vec<_> = (&sl).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(sl.iter().len(), 5);
        let mut iter = sl.iter();
        iter.nth(2);
        assert_eq!(format!("{iter:?}"), "[3, 4]");
    }
}
