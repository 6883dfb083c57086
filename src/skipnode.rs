//! Node and link storage.
//!
//! Nodes live in an arena and refer to each other through [`NodeId`]s. The
//! level-0 chain starting at the head visits every live node exactly once and
//! is the order in which nodes are released; links on higher levels are plain
//! shortcuts along that chain.

use crate::error::SkipListError;

/// Stable handle onto a node slot in [`Storage`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

impl NodeId {
    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0
    }
}

/// A link to the next node on one level.
///
/// `span` is the number of level-0 steps the link covers. A link without a
/// successor spans every node left after its owner, so that the span of the
/// head's link on any level never needs recomputing from scratch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Link {
    pub(crate) span: usize,
    pub(crate) next: Option<NodeId>,
}

/// The place a search stopped on some level: either the head or a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Position {
    Head,
    Node(NodeId),
}

/// A node of the skiplist.
///
/// The node has one link per level it occupies. The link array is sized once
/// from the level drawn at insertion and never resized.
#[derive(Debug)]
pub(crate) struct SkipNode<T> {
    pub(crate) value: T,
    pub(crate) links: Box<[Link]>,
}

impl<T> SkipNode<T> {
    /// Create a node reaching up to `level` (inclusive), with unlinked links.
    pub(crate) fn new(value: T, level: usize) -> Result<Self, SkipListError> {
        Ok(Self {
            value,
            links: alloc_links(level + 1)?,
        })
    }

    /// How high the node reaches.
    #[inline]
    pub(crate) fn level(&self) -> usize {
        self.links.len() - 1
    }
}

/// Allocate `count` empty links, reporting allocation failure.
fn alloc_links(count: usize) -> Result<Box<[Link]>, SkipListError> {
    let mut links = Vec::new();
    links.try_reserve_exact(count)?;
    links.resize(count, Link::default());
    Ok(links.into_boxed_slice())
}

/// Capacity kept by an emptied arena.
const SHRINK_FLOOR: usize = 16;

// ////////////////////////////////////////////////////////////////////////////
// Storage
// ////////////////////////////////////////////////////////////////////////////

/// The head links plus an arena holding every node.
///
/// Freed slots are recycled before the arena grows. Once the last node is
/// released the arena is emptied and its buffers shrunk back to
/// [`SHRINK_FLOOR`] slots.
#[derive(Debug)]
pub(crate) struct Storage<T> {
    head: Box<[Link]>,
    slots: Vec<Option<SkipNode<T>>>,
    free: Vec<NodeId>,
}

impl<T> Storage<T> {
    /// Empty storage whose head spans `levels` levels.
    pub(crate) fn new(levels: usize) -> Result<Self, SkipListError> {
        Ok(Self {
            head: alloc_links(levels)?,
            slots: Vec::new(),
            free: Vec::new(),
        })
    }

    /// Number of levels of the head.
    #[inline]
    pub(crate) fn levels(&self) -> usize {
        self.head.len()
    }

    /// Number of nodes currently stored.
    #[cfg(test)]
    pub(crate) fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Move `node` into the arena.
    pub(crate) fn alloc(&mut self, node: SkipNode<T>) -> Result<NodeId, SkipListError> {
        if let Some(id) = self.free.pop() {
            self.slots[id.index()] = Some(node);
            Ok(id)
        } else {
            self.slots.try_reserve(1)?;
            self.slots.push(Some(node));
            Ok(NodeId(self.slots.len() - 1))
        }
    }

    /// Move the node out of the arena, releasing its slot.
    #[expect(
        clippy::expect_used,
        reason = "Handles only come from links of live nodes"
    )]
    pub(crate) fn take(&mut self, id: NodeId) -> SkipNode<T> {
        let node = self.slots[id.index()]
            .take()
            .expect("`Storage::take()` - `id` is invalid!");
        self.free.push(id);
        if self.free.len() == self.slots.len() {
            self.release();
        }
        node
    }

    #[inline]
    #[expect(
        clippy::expect_used,
        reason = "Handles only come from links of live nodes"
    )]
    pub(crate) fn node(&self, id: NodeId) -> &SkipNode<T> {
        self.slots[id.index()]
            .as_ref()
            .expect("`Storage::node()` - `id` is invalid!")
    }

    #[inline]
    pub(crate) fn value(&self, id: NodeId) -> &T {
        &self.node(id).value
    }

    /// The links of the head or of a node.
    #[inline]
    pub(crate) fn links(&self, position: Position) -> &[Link] {
        match position {
            Position::Head => &self.head,
            Position::Node(id) => &self.node(id).links,
        }
    }

    #[inline]
    pub(crate) fn link(&self, position: Position, level: usize) -> Link {
        self.links(position)[level]
    }

    #[inline]
    #[expect(
        clippy::expect_used,
        reason = "Handles only come from links of live nodes"
    )]
    pub(crate) fn link_mut(&mut self, position: Position, level: usize) -> &mut Link {
        match position {
            Position::Head => &mut self.head[level],
            Position::Node(id) => {
                &mut self.slots[id.index()]
                    .as_mut()
                    .expect("`Storage::link_mut()` - `id` is invalid!")
                    .links[level]
            }
        }
    }

    /// The first node on level 0, if any.
    #[inline]
    pub(crate) fn first(&self) -> Option<NodeId> {
        self.head[0].next
    }

    /// The successor of `id` on level 0.
    #[inline]
    pub(crate) fn next(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).links[0].next
    }

    /// Release every node in level-0 order and unlink the head.
    pub(crate) fn clear(&mut self) {
        let mut next = self.first();
        while let Some(id) = next {
            next = self.take(id).links[0].next;
        }
        self.head.fill(Link::default());
        self.release();
    }

    /// Drop every slot and give back the memory beyond [`SHRINK_FLOOR`].
    fn release(&mut self) {
        self.slots.clear();
        self.slots.shrink_to(SHRINK_FLOOR);
        self.free.clear();
        self.free.shrink_to(SHRINK_FLOOR);
    }
}
