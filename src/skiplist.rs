//! An always-ordered skiplist with rank access.

use std::{cmp::Ordering, fmt, iter, ops};

use crate::{
    compare::{Compare, NaturalOrder},
    config::{Config, MAX_LEVELS, Policy, validate_levels},
    error::SkipListError,
    iter::{Cursor, Iter},
    level_generator::{LeadingZeros, LevelGenerator},
    skipnode::{Link, Position, SkipNode, Storage},
};

// ////////////////////////////////////////////////////////////////////////////
// SkipList
// ////////////////////////////////////////////////////////////////////////////

/// The skiplist provides a way of storing elements such that they are always
/// sorted and at the same time provides efficient way to access, insert and
/// remove nodes. Every link also records how many elements it skips over, so
/// the element at a given index and the index of a given element are both
/// found in `O(log(n))` on average.
///
/// The ordering is given by a [`Compare`] implementation; by default this is
/// `T`'s own [`Ord`]. Equal elements are kept in insertion order unless the
/// list was built with [`Policy::UniqueSet`], in which case inserting an
/// element equal to a stored one does nothing.
///
/// ```
/// use ranked_skiplist::SkipList;
///
/// let mut skiplist = SkipList::new();
/// skiplist.extend([5, 1, 4, 1]);
/// assert_eq!(skiplist.at_index(1).ok(), Some(&1));
/// assert_eq!(skiplist.rank_of(&4), Some(2));
/// assert_eq!(skiplist.remove(&1).ok(), Some(1));
/// assert_eq!(skiplist.iter().copied().collect::<Vec<_>>(), [1, 4, 5]);
/// ```
pub struct SkipList<T, C = NaturalOrder, G = LeadingZeros> {
    pub(crate) storage: Storage<T>,
    len: usize,
    policy: Policy,
    compare: C,
    level_generator: G,
}

/// The anchors a top-down search stopped at on each level, together with
/// their rank (the head has rank 0, the first node rank 1).
struct Path {
    anchors: [Position; MAX_LEVELS],
    ranks: [usize; MAX_LEVELS],
}

// ///////////////////////////////////////////////
// Constructors
// ///////////////////////////////////////////////

impl<T: Ord> SkipList<T> {
    /// Create a new skiplist with the default configuration: 16 levels,
    /// duplicates allowed, and `T`'s natural order.
    ///
    /// # Panics
    ///
    /// Panics if the head node cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_skiplist::SkipList;
    ///
    /// let mut skiplist: SkipList<i64> = SkipList::new();
    /// ```
    #[inline]
    #[must_use]
    #[expect(
        clippy::expect_used,
        reason = "The default configuration is always valid"
    )]
    pub fn new() -> Self {
        Self::with_config(Config::default()).expect("failed to allocate the skiplist head")
    }

    /// Create a new skiplist ordered by `T`'s natural order.
    ///
    /// # Errors
    ///
    /// [`SkipListError::ZeroLevels`] or [`SkipListError::TooManyLevels`] if
    /// the number of levels is not in `[1, 32]`, and
    /// [`SkipListError::OutOfMemory`] if the head cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_skiplist::{Config, Policy, SkipList};
    ///
    /// let config = Config::default().with_max_levels(5).with_policy(Policy::UniqueSet);
    /// let mut skiplist = SkipList::with_config(config)?;
    /// assert!(skiplist.insert(3)?);
    /// assert!(!skiplist.insert(3)?);
    /// assert_eq!(skiplist.len(), 1);
    /// # Ok::<(), ranked_skiplist::SkipListError>(())
    /// ```
    #[inline]
    pub fn with_config(config: Config) -> Result<Self, SkipListError> {
        Self::with_comparator(config, NaturalOrder)
    }
}

impl<T, C: Compare<T>> SkipList<T, C> {
    /// Create a new skiplist using the provided comparator in order to
    /// determine the ordering of elements within the list.
    ///
    /// # Errors
    ///
    /// As for [`with_config`][SkipList::with_config].
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_skiplist::{Config, SkipList};
    ///
    /// // Store even numbers before odd ones and sort as usual within same parity group.
    /// let mut skiplist = SkipList::with_comparator(Config::default(), |a: &u64, b: &u64| {
    ///     (a % 2).cmp(&(b % 2)).then(a.cmp(b))
    /// })?;
    /// skiplist.extend(0..6);
    /// assert_eq!(skiplist.iter().copied().collect::<Vec<_>>(), [0, 2, 4, 1, 3, 5]);
    /// # Ok::<(), ranked_skiplist::SkipListError>(())
    /// ```
    #[inline]
    pub fn with_comparator(config: Config, compare: C) -> Result<Self, SkipListError> {
        config.validate()?;
        let level_generator = LeadingZeros::new(config.max_levels)?;
        Self::with_parts(config.policy, compare, level_generator)
    }
}

impl<T, C: Compare<T>, G: LevelGenerator> SkipList<T, C, G> {
    /// Create a new skiplist from its individual parts. The number of levels
    /// is taken from the level generator.
    ///
    /// # Errors
    ///
    /// [`SkipListError::ZeroLevels`] or [`SkipListError::TooManyLevels`] if
    /// the generator's total is not in `[1, 32]`, and
    /// [`SkipListError::OutOfMemory`] if the head cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_skiplist::{level_generator::Geometric, NaturalOrder, Policy, SkipList};
    ///
    /// let generator = Geometric::new(8, 0.25, 42)?;
    /// let mut skiplist = SkipList::with_parts(Policy::AllowDuplicates, NaturalOrder, generator)?;
    /// skiplist.extend(0..100);
    /// assert_eq!(skiplist.at_index(42).ok(), Some(&42));
    /// # Ok::<(), ranked_skiplist::SkipListError>(())
    /// ```
    #[inline]
    pub fn with_parts(policy: Policy, compare: C, level_generator: G) -> Result<Self, SkipListError> {
        let levels = level_generator.total();
        validate_levels(levels)?;
        debug_log!(levels, %policy, "creating skiplist");
        Ok(Self {
            storage: Storage::new(levels)?,
            len: 0,
            policy,
            compare,
            level_generator,
        })
    }
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<T, C, G> SkipList<T, C, G> {
    /// Returns the number of elements in the skiplist.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_skiplist::SkipList;
    ///
    /// let mut skiplist = SkipList::new();
    /// skiplist.extend(0..10);
    /// assert_eq!(skiplist.len(), 10);
    /// ```
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the skiplist contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of levels of the head node.
    #[inline]
    #[must_use]
    pub fn max_levels(&self) -> usize {
        self.storage.levels()
    }

    /// The duplicate policy the skiplist was built with.
    #[inline]
    #[must_use]
    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Clears the skiplist, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_skiplist::SkipList;
    ///
    /// let mut skiplist = SkipList::new();
    /// skiplist.extend(0..10);
    /// skiplist.clear();
    /// assert!(skiplist.is_empty());
    /// ```
    #[inline]
    pub fn clear(&mut self) {
        debug_log!(len = self.len, "clearing skiplist");
        self.storage.clear();
        self.len = 0;
    }

    /// Provides a reference to the element at the given index, that is the
    /// `index + 1`-th smallest element.
    ///
    /// # Errors
    ///
    /// [`SkipListError::IndexOutOfBounds`] if `index >= len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_skiplist::SkipList;
    ///
    /// let mut skiplist = SkipList::new();
    /// assert!(skiplist.at_index(0).is_err());
    /// skiplist.extend((0..10).rev());
    /// assert_eq!(skiplist.at_index(0).ok(), Some(&0));
    /// assert!(skiplist.at_index(10).is_err());
    /// ```
    pub fn at_index(&self, index: usize) -> Result<&T, SkipListError> {
        let out_of_bounds = SkipListError::IndexOutOfBounds {
            index,
            len: self.len,
        };
        if index >= self.len {
            return Err(out_of_bounds);
        }

        // The first element is one step away from the head.
        let mut remaining = index + 1;
        let mut current = Position::Head;
        for level in (0..self.max_levels()).rev() {
            loop {
                match self.storage.link(current, level) {
                    Link {
                        span,
                        next: Some(next),
                    } if span <= remaining => {
                        remaining -= span;
                        current = Position::Node(next);
                    }
                    _ => break,
                }
            }
            if remaining == 0 {
                break;
            }
        }

        match current {
            Position::Node(id) if remaining == 0 => Ok(self.storage.value(id)),
            _ => Err(out_of_bounds),
        }
    }

    /// Provides a reference to the element at the given index, or `None` if
    /// the index is out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.at_index(index).ok()
    }

    /// Provides a reference to the front element, or `None` if the skiplist is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_skiplist::SkipList;
    ///
    /// let mut skiplist = SkipList::new();
    /// assert!(skiplist.front().is_none());
    ///
    /// skiplist.extend([2, 1]);
    /// assert_eq!(skiplist.front(), Some(&1));
    /// ```
    #[inline]
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.storage.first().map(|id| self.storage.value(id))
    }

    /// Provides a reference to the back element, or `None` if the skiplist is
    /// empty.
    #[inline]
    #[must_use]
    pub fn back(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|index| self.get(index))
    }

    /// A cursor on the smallest element, or [`end`][SkipList::end] if the
    /// skiplist is empty.
    ///
    /// The cursor borrows the skiplist, so the skiplist cannot be modified
    /// while a traversal is in progress.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_skiplist::SkipList;
    ///
    /// let mut skiplist = SkipList::new();
    /// skiplist.extend([3, 1, 2]);
    ///
    /// let mut seen: Vec<&i32> = Vec::new();
    /// let mut cursor = skiplist.begin();
    /// while !cursor.is_end() {
    ///     seen.extend(cursor.value());
    ///     cursor = cursor.next();
    /// }
    /// assert_eq!(seen, [&1, &2, &3]);
    /// assert!(cursor == skiplist.end());
    /// ```
    #[inline]
    #[must_use]
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(&self.storage, self.storage.first())
    }

    /// The cursor one past the largest element.
    #[inline]
    #[must_use]
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::new(&self.storage, None)
    }

    /// Creates an iterator over the entries of the skiplist, in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_skiplist::SkipList;
    ///
    /// let mut skiplist = SkipList::new();
    /// skiplist.extend(0..10);
    /// for i in skiplist.iter() {
    ///     println!("Value: {}", i);
    /// }
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.begin(), self.len)
    }

    /// Removes and returns the element at the given index.
    ///
    /// # Errors
    ///
    /// [`SkipListError::IndexOutOfBounds`] if `index >= len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_skiplist::SkipList;
    ///
    /// let mut skiplist = SkipList::new();
    /// skiplist.extend(0..10);
    /// assert_eq!(skiplist.remove_index(4).ok(), Some(4));
    /// assert_eq!(skiplist.remove_index(4).ok(), Some(5));
    /// ```
    pub fn remove_index(&mut self, index: usize) -> Result<T, SkipListError> {
        if index >= self.len {
            return Err(SkipListError::IndexOutOfBounds {
                index,
                len: self.len,
            });
        }
        // Stop before the node of rank `index + 1`.
        let path = self.find_path(|rank, _| rank <= index);
        self.unlink_after(&path)
            .ok_or(SkipListError::IndexOutOfBounds {
                index,
                len: self.len,
            })
    }

    /// Removes the first element and returns it, or `None` if the skiplist is
    /// empty.
    #[inline]
    pub fn pop_front(&mut self) -> Option<T> {
        self.remove_index(0).ok()
    }

    /// Removes the last element and returns it, or `None` if the skiplist is
    /// empty.
    #[inline]
    pub fn pop_back(&mut self) -> Option<T> {
        let index = self.len.checked_sub(1)?;
        self.remove_index(index).ok()
    }
}

impl<T, C: Compare<T>, G> SkipList<T, C, G> {
    /// Returns true if the value is contained in the skiplist.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_skiplist::SkipList;
    ///
    /// let mut skiplist = SkipList::new();
    /// skiplist.extend(0..10);
    /// assert!(skiplist.contains(&4));
    /// assert!(!skiplist.contains(&15));
    /// ```
    pub fn contains(&self, value: &T) -> bool {
        let mut current = Position::Head;
        for level in (0..self.max_levels()).rev() {
            while let Some(next) = self.storage.link(current, level).next {
                match self.compare.compare(self.storage.value(next), value) {
                    Ordering::Less => current = Position::Node(next),
                    Ordering::Equal => return true,
                    Ordering::Greater => break,
                }
            }
        }
        false
    }

    /// The index of the first element equal to `value`, or `None` if there is
    /// no such element. This is the inverse of
    /// [`at_index`][SkipList::at_index].
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_skiplist::SkipList;
    ///
    /// let mut skiplist = SkipList::new();
    /// skiplist.extend([10, 20, 20, 30]);
    /// assert_eq!(skiplist.rank_of(&20), Some(1));
    /// assert_eq!(skiplist.rank_of(&30), Some(3));
    /// assert_eq!(skiplist.rank_of(&25), None);
    /// ```
    pub fn rank_of(&self, value: &T) -> Option<usize> {
        let path = self.find_path(|_, next| self.compare.compare(next, value) == Ordering::Less);
        let next = self.storage.link(path.anchors[0], 0).next?;
        (self.compare.compare(self.storage.value(next), value) == Ordering::Equal)
            .then_some(path.ranks[0])
    }

    /// Removes and returns the first element equal to `value`.
    ///
    /// If the skiplist contains several equal elements, the one inserted
    /// earliest is removed.
    ///
    /// # Errors
    ///
    /// [`SkipListError::NotFound`] if no element equals `value`; the skiplist
    /// is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_skiplist::SkipList;
    ///
    /// let mut skiplist = SkipList::new();
    /// skiplist.extend(0..10);
    /// assert_eq!(skiplist.remove(&4).ok(), Some(4));
    /// assert!(skiplist.remove(&4).is_err()); // No more '4' left
    /// ```
    pub fn remove(&mut self, value: &T) -> Result<T, SkipListError> {
        let path = self.find_path(|_, next| self.compare.compare(next, value) == Ordering::Less);
        match self.storage.link(path.anchors[0], 0).next {
            Some(next) if self.compare.compare(self.storage.value(next), value) == Ordering::Equal => {}
            _ => return Err(SkipListError::NotFound),
        }
        self.unlink_after(&path).ok_or(SkipListError::NotFound)
    }
}

impl<T, C: Compare<T>, G: LevelGenerator> SkipList<T, C, G> {
    /// Insert the element into the skiplist, after any elements equal to it.
    ///
    /// Returns `true` if the element was stored. Under
    /// [`Policy::UniqueSet`], inserting an element equal to one already
    /// stored succeeds but leaves the skiplist untouched and returns `false`.
    ///
    /// # Errors
    ///
    /// [`SkipListError::OutOfMemory`] if the node cannot be allocated; the
    /// skiplist is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use ranked_skiplist::SkipList;
    ///
    /// let mut skiplist = SkipList::new();
    ///
    /// skiplist.insert(0)?;
    /// skiplist.insert(5)?;
    /// assert_eq!(skiplist.len(), 2);
    /// assert!(!skiplist.is_empty());
    /// # Ok::<(), ranked_skiplist::SkipListError>(())
    /// ```
    pub fn insert(&mut self, value: T) -> Result<bool, SkipListError> {
        let path = self.find_path(|_, next| self.compare.compare(next, &value) != Ordering::Greater);

        if self.policy == Policy::UniqueSet {
            if let Position::Node(anchor) = path.anchors[0] {
                if self.compare.compare(self.storage.value(anchor), &value) == Ordering::Equal {
                    return Ok(false);
                }
            }
        }

        let levels = self.max_levels();
        let level = self.level_generator.level().min(levels - 1);
        let id = self.storage.alloc(SkipNode::new(value, level)?)?;
        let rank = path.ranks[0] + 1;
        trace_log!(level, rank, "inserting node");

        // Links passing over the new node now span one more element.
        for i in level + 1..levels {
            self.storage.link_mut(path.anchors[i], i).span += 1;
        }
        // Split the anchor's link around the new node on every level it
        // occupies.
        for i in 0..=level {
            let distance = rank - path.ranks[i];
            let anchor = self.storage.link(path.anchors[i], i);
            *self.storage.link_mut(Position::Node(id), i) = Link {
                span: anchor.span + 1 - distance,
                next: anchor.next,
            };
            *self.storage.link_mut(path.anchors[i], i) = Link {
                span: distance,
                next: Some(id),
            };
        }

        self.len += 1;
        Ok(true)
    }
}

// ///////////////////////////////////////////////
// Internal methods
// ///////////////////////////////////////////////

impl<T, C, G> SkipList<T, C, G> {
    /// Descend from the head, advancing on each level while `advance` holds
    /// for the successor, and record where each level stopped.
    ///
    /// `advance` is given the rank the move would reach and the successor's
    /// value. The horizontal position carries over from one level to the next.
    fn find_path(&self, mut advance: impl FnMut(usize, &T) -> bool) -> Path {
        let mut path = Path {
            anchors: [Position::Head; MAX_LEVELS],
            ranks: [0; MAX_LEVELS],
        };
        let mut current = Position::Head;
        let mut rank = 0;
        for level in (0..self.max_levels()).rev() {
            loop {
                let link = self.storage.link(current, level);
                match link.next {
                    Some(next) if advance(rank + link.span, self.storage.value(next)) => {
                        rank += link.span;
                        current = Position::Node(next);
                    }
                    _ => break,
                }
            }
            path.anchors[level] = current;
            path.ranks[level] = rank;
        }
        path
    }

    /// Remove the level-0 successor of the path's bottom anchor, merging the
    /// spans it separated. Returns `None` if there is no such successor.
    fn unlink_after(&mut self, path: &Path) -> Option<T> {
        let victim = self.storage.link(path.anchors[0], 0).next?;
        let node = self.storage.take(victim);
        let level = node.level();
        trace_log!(level, rank = path.ranks[0] + 1, "removing node");

        for i in 0..self.max_levels() {
            let link = self.storage.link_mut(path.anchors[i], i);
            if i <= level {
                debug_assert_eq!(link.next, Some(victim), "anchor must precede the victim");
                link.next = node.links[i].next;
                link.span += node.links[i].span;
            }
            link.span -= 1;
        }

        self.len -= 1;
        Some(node.value)
    }

    /// Checks the integrity of the skiplist.
    #[cfg(test)]
    pub(crate) fn check(&self)
    where
        C: Compare<T>,
    {
        use std::collections::HashMap;

        use crate::skipnode::NodeId;

        // Level 0: every node in order, with its rank.
        let mut ranks: HashMap<NodeId, usize> = HashMap::new();
        let mut order: Vec<NodeId> = Vec::new();
        let mut next = self.storage.first();
        while let Some(id) = next {
            order.push(id);
            ranks.insert(id, order.len());
            next = self.storage.next(id);
        }
        assert_eq!(order.len(), self.len, "level 0 disagrees with len");
        assert_eq!(self.storage.live(), self.len, "arena leaks nodes");

        for pair in order.windows(2) {
            let ordering = self
                .compare
                .compare(self.storage.value(pair[0]), self.storage.value(pair[1]));
            match self.policy {
                Policy::AllowDuplicates => assert_ne!(ordering, Ordering::Greater),
                Policy::UniqueSet => assert_eq!(ordering, Ordering::Less),
            }
        }

        for &id in &order {
            let level = self.storage.node(id).level();
            assert!(level < self.max_levels(), "node above the head");
        }

        for level in 0..self.max_levels() {
            let mut current = Position::Head;
            let mut rank = 0;
            loop {
                let link = self.storage.link(current, level);
                match link.next {
                    Some(next) => {
                        assert!(self.storage.node(next).level() >= level);
                        assert_eq!(rank + link.span, ranks[&next], "span mismatch on level {level}");
                        rank = ranks[&next];
                        current = Position::Node(next);
                    }
                    None => {
                        assert_eq!(rank + link.span, self.len, "tail span mismatch on level {level}");
                        break;
                    }
                }
            }
        }
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

impl<T: Ord> Default for SkipList<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Elements rejected by a [`Policy::UniqueSet`] list are silently dropped.
///
/// # Panics
///
/// Panics if a node cannot be allocated.
impl<T, C: Compare<T>, G: LevelGenerator> Extend<T> for SkipList<T, C, G> {
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iterable: I) {
        for element in iterable {
            if let Err(err) = self.insert(element) {
                panic!("failed to extend skiplist: {err}");
            }
        }
    }
}

impl<T: Ord> iter::FromIterator<T> for SkipList<T> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut skiplist = Self::new();
        skiplist.extend(iter);
        skiplist
    }
}

impl<T, C, G> ops::Index<usize> for SkipList<T, C, G> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        match self.at_index(index) {
            Ok(value) => value,
            Err(err) => panic!("`SkipList::index()` - {err}"),
        }
    }
}

impl<T: fmt::Debug, C, G> fmt::Debug for SkipList<T, C, G> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display, C, G> fmt::Display for SkipList<T, C, G> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, entry) in self.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{entry}")?;
        }
        write!(f, "]")
    }
}

impl<'a, T, C, G> IntoIterator for &'a SkipList<T, C, G> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Tests
// ////////////////////////////////////////////////////////////////////////////
