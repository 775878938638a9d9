//! BigList — an arena-backed B-tree engine for very large ordered
//! sequences.
//!
//! A tree never materialises as a flat collection: leaves hold blocks of
//! opaque elements, inner nodes hold child references with cached subtree
//! sizes and leftmost ordinals. All nodes live in a [`SlotArena`] whose
//! slot ids stay stable across in-place rewrites, so ancestors can cache a
//! child's slot without revisiting it after every descendant mutation.
//!
//! The engine supports positional lookup ([`BigList::find_nth`]), rank
//! lookup against a caller-supplied ordering ([`BigList::find_ord`]), bulk
//! range extraction/insertion/deletion, O(height) append
//! ([`BigList::insert_last`]) and cursor-based block iteration
//! ([`BigList::start`] / [`BigList::next`]).
//!
//! ```
//! let mut list = biglist::BigList::with_fanout(4, |e: &i64| *e);
//! let mut h = None;
//! for i in 1..=20 {
//!     h = Some(list.insert_last(h, i));
//! }
//! assert_eq!(list.length(&h), 20);
//! assert_eq!(*list.find_nth(&h, 7).unwrap(), 7);
//! let h = list.delete_range(h, 5, 10);
//! assert_eq!(list.length(&h), 14);
//! assert_eq!(*list.find_nth(&h, 5).unwrap(), 11);
//! ```
//!
//! Every structural operation runs to completion before returning; a node
//! observed mid-split would be invalid, so nothing here yields or calls
//! back into the engine.

mod append;
mod destroy;
mod handle;
mod iter;
mod merge;
mod navigate;
mod print;
mod range;
mod split;
mod store;

pub use handle::Handle;
pub use iter::{Blocks, Cursor};
pub use store::{Node, SlotArena, SlotId};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("position {index} out of range 1..={size}")]
    OutOfRange { index: usize, size: usize },
}

/// Default branching bound; `min_fanout` is derived as `max_fanout / 2`.
pub const DEFAULT_FANOUT: usize = 7;

/// The tree engine: the slot arena, the fanout configuration and the
/// ordinal extractor shared by every tree created through it.
pub struct BigList<E, O, F = fn(&E) -> O>
where
    O: Clone,
    F: Fn(&E) -> O,
{
    pub(crate) arena: SlotArena<E, O>,
    pub(crate) max_fanout: usize,
    ordinal_of: F,
}

impl<E, O, F> BigList<E, O, F>
where
    O: Clone,
    F: Fn(&E) -> O,
{
    pub fn new(ordinal_of: F) -> Self {
        Self::with_fanout(DEFAULT_FANOUT, ordinal_of)
    }

    /// `max_fanout` must be at least 4 so that `min_fanout >= 2`.
    pub fn with_fanout(max_fanout: usize, ordinal_of: F) -> Self {
        assert!(max_fanout >= 4, "max_fanout below 4");
        Self {
            arena: SlotArena::new(),
            max_fanout,
            ordinal_of,
        }
    }

    pub(crate) fn min_fanout(&self) -> usize {
        self.max_fanout / 2
    }

    /// Sort key of an element.
    pub fn ordinal(&self, e: &E) -> O {
        (self.ordinal_of)(e)
    }

    /// Number of leaves in `h`.
    pub fn length(&self, h: &Option<Handle<O>>) -> usize {
        h.as_ref().map_or(0, |h| h.size)
    }

    /// Number of live nodes in the arena, across every tree this engine
    /// owns. Useful for leak diagnostics in tests.
    pub fn live_nodes(&self) -> usize {
        self.arena.live()
    }

    pub(crate) fn new_leaf(&mut self, elems: Vec<E>) -> Handle<O> {
        let size = elems.len();
        let leftmost = self.ordinal(&elems[0]);
        let slot = self.arena.allocate(Node::Leaf(elems));
        Handle::new(slot, size, leftmost)
    }

    pub(crate) fn new_inner(&mut self, height: usize, children: Vec<Handle<O>>) -> Handle<O> {
        let size = children.iter().map(|c| c.size).sum();
        let leftmost = children[0].leftmost.clone();
        let slot = self.arena.allocate(Node::Inner { height, children });
        Handle::new(slot, size, leftmost)
    }

    /// Exact handle for `slot`, recomputed from the node's contents.
    pub(crate) fn summarize(&self, slot: SlotId) -> Handle<O> {
        match self.arena.read(slot) {
            Node::Leaf(elems) => Handle::new(slot, elems.len(), self.ordinal(&elems[0])),
            Node::Inner { children, .. } => Handle::new(
                slot,
                children.iter().map(|c| c.size).sum(),
                children[0].leftmost.clone(),
            ),
        }
    }
}

impl<E, O, F> BigList<E, O, F>
where
    O: Clone + PartialEq + std::fmt::Debug,
    F: Fn(&E) -> O,
{
    /// Walks the whole structure asserting the balance and cache
    /// invariants; intended for tests and debugging.
    ///
    /// Checked per node: child counts within `[min_fanout, max_fanout]`
    /// except along the rightmost spine (which may fall to 1), cached
    /// sizes equal to reachable leaf counts, cached leftmost ordinals
    /// equal to the first leaf's ordinal, uniform heights, and no
    /// single-child root above height 0.
    pub fn check_invariants(&self, h: &Option<Handle<O>>) {
        let Some(h) = h.as_ref() else { return };
        let root = self.arena.read(h.slot);
        assert!(root.fanout() <= self.max_fanout, "root fanout overflow");
        if root.height() > 0 {
            assert!(root.fanout() > 1, "unscrunched single-child root");
        }
        let (_, leaves, leftmost) = self.check_node(h.slot, true);
        assert_eq!(h.size, leaves, "handle size cache");
        assert_eq!(h.leftmost, leftmost, "handle leftmost cache");
    }

    fn check_node(&self, slot: SlotId, rightmost: bool) -> (usize, usize, O) {
        match self.arena.read(slot) {
            Node::Leaf(elems) => {
                assert!(!elems.is_empty(), "empty leaf");
                (0, elems.len(), self.ordinal(&elems[0]))
            }
            Node::Inner { height, children } => {
                assert!(!children.is_empty(), "empty inner node");
                let last = children.len() - 1;
                let mut leaves = 0;
                for (i, c) in children.iter().enumerate() {
                    let child_rightmost = rightmost && i == last;
                    let f = self.arena.read(c.slot).fanout();
                    if child_rightmost {
                        assert!(f >= 1 && f <= self.max_fanout, "fanout {f} on right spine");
                    } else {
                        assert!(
                            f >= self.min_fanout() && f <= self.max_fanout,
                            "fanout {f} outside [{}, {}]",
                            self.min_fanout(),
                            self.max_fanout
                        );
                    }
                    let (ch, cl, cleft) = self.check_node(c.slot, child_rightmost);
                    assert_eq!(ch + 1, *height, "uneven heights");
                    assert_eq!(cl, c.size, "child size cache");
                    assert_eq!(cleft, c.leftmost, "child leftmost cache");
                    leaves += cl;
                }
                (*height, leaves, children[0].leftmost.clone())
            }
        }
    }
}
