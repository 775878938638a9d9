//! Cursor-based block iteration.
//!
//! The traversal yields contiguous leaf blocks, not single elements, and
//! is forward-only: restart by calling [`BigList::start`] again. There is
//! no suspension point and no cleanup — an abandoned [`Cursor`] is just
//! dropped.

use crate::handle::Handle;
use crate::navigate::prefix_find;
use crate::store::{Node, SlotId};
use crate::BigList;

/// One pending level of the traversal: an ancestor node, the index of its
/// next unvisited child, and how many elements it still owes.
#[derive(Debug, Clone)]
struct Frame {
    slot: SlotId,
    next_child: usize,
    remaining: usize,
}

/// Iteration state between blocks. Frames are recorded only at ancestors
/// whose right-hand remainder is not yet fully yielded, innermost last.
#[derive(Debug, Clone)]
pub struct Cursor {
    frames: Vec<Frame>,
}

impl<E, O, F> BigList<E, O, F>
where
    O: Clone,
    F: Fn(&E) -> O,
{
    /// Begins iteration over leaves `first..=last` (clamped to the tree).
    /// Returns the in-range slice of the first leaf plus the cursor, or
    /// `None` for an empty range.
    pub fn start(&self, h: &Option<Handle<O>>, first: usize, last: usize) -> Option<(&[E], Cursor)> {
        let size = self.length(h);
        let first = first.max(1);
        let last = last.min(size);
        if first > last {
            return None;
        }
        let h = h.as_ref()?;
        let mut frames = Vec::new();
        let mut slot = h.slot;
        let mut n = first;
        let mut want = last - first + 1;
        loop {
            match self.arena.read(slot) {
                Node::Leaf(elems) => {
                    let at = n - 1;
                    return Some((&elems[at..at + want], Cursor { frames }));
                }
                Node::Inner { children, .. } => {
                    let (i, r) = prefix_find(children, n);
                    let idx = i - 1;
                    let within = want.min(children[idx].size - r + 1);
                    if want > within {
                        frames.push(Frame {
                            slot,
                            next_child: idx + 1,
                            remaining: want - within,
                        });
                    }
                    slot = children[idx].slot;
                    n = r;
                    want = within;
                }
            }
        }
    }

    /// Yields the next leaf block and advanced cursor, or `None` once the
    /// range is exhausted.
    pub fn next(&self, mut cursor: Cursor) -> Option<(&[E], Cursor)> {
        let frame = cursor.frames.pop()?;
        let Node::Inner { children, .. } = self.arena.read(frame.slot) else {
            unreachable!("cursor frames point at inner nodes")
        };
        let child = &children[frame.next_child];
        let within = frame.remaining.min(child.size);
        if frame.remaining > within {
            cursor.frames.push(Frame {
                slot: frame.slot,
                next_child: frame.next_child + 1,
                remaining: frame.remaining - within,
            });
        }
        // descend the left edge to the next leaf
        let mut slot = child.slot;
        let mut want = within;
        loop {
            match self.arena.read(slot) {
                Node::Leaf(elems) => return Some((&elems[..want], cursor)),
                Node::Inner { children, .. } => {
                    let within = want.min(children[0].size);
                    if want > within {
                        cursor.frames.push(Frame {
                            slot,
                            next_child: 1,
                            remaining: want - within,
                        });
                    }
                    slot = children[0].slot;
                    want = within;
                }
            }
        }
    }

    /// Std-iterator adapter over [`start`](Self::start) /
    /// [`next`](Self::next).
    pub fn blocks<'a>(&'a self, h: &Option<Handle<O>>, first: usize, last: usize) -> Blocks<'a, E, O, F> {
        Blocks {
            list: self,
            pending: self.start(h, first, last),
        }
    }
}

/// Lazy sequence of contiguous leaf blocks.
pub struct Blocks<'a, E, O, F>
where
    O: Clone,
    F: Fn(&E) -> O,
{
    list: &'a BigList<E, O, F>,
    pending: Option<(&'a [E], Cursor)>,
}

impl<'a, E, O, F> Iterator for Blocks<'a, E, O, F>
where
    O: Clone,
    F: Fn(&E) -> O,
{
    type Item = &'a [E];

    fn next(&mut self) -> Option<&'a [E]> {
        let (block, cursor) = self.pending.take()?;
        self.pending = self.list.next(cursor);
        Some(block)
    }
}
