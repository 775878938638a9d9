//! Positional and rank descent.

use crate::handle::Handle;
use crate::store::{Node, SlotId};
use crate::{BigList, TreeError};

/// 1-based index of the child containing `offset`, plus the residual
/// offset within that child. `offset` must not exceed the total size.
pub(crate) fn prefix_find<O>(children: &[Handle<O>], offset: usize) -> (usize, usize) {
    let mut n = offset;
    for (i, c) in children.iter().enumerate() {
        if n <= c.size {
            return (i + 1, n);
        }
        n -= c.size;
    }
    unreachable!("offset past the end of the child list")
}

impl<E, O, F> BigList<E, O, F>
where
    O: Clone,
    F: Fn(&E) -> O,
{
    /// The `n`-th leaf element, 1-based.
    pub fn find_nth<'a>(&'a self, h: &Option<Handle<O>>, n: usize) -> Result<&'a E, TreeError> {
        let size = self.length(h);
        if n < 1 || n > size {
            return Err(TreeError::OutOfRange { index: n, size });
        }
        let h = h.as_ref().expect("nonzero size");
        let mut slot = h.slot;
        let mut n = n;
        loop {
            match self.arena.read(slot) {
                Node::Leaf(elems) => return Ok(&elems[n - 1]),
                Node::Inner { children, .. } => {
                    let (i, rem) = prefix_find(children, n);
                    slot = children[i - 1].slot;
                    n = rem;
                }
            }
        }
    }

    /// Rank of `key` in a tree sorted ascending under `less`: the largest
    /// `i` such that `less(key, ordinal(leaf_i))` is false, or 0 when the
    /// key precedes every element. Out-of-range keys clamp to 0 or `size`;
    /// this never errors.
    ///
    /// Inner nodes are scanned from the right using the cached leftmost
    /// ordinals, so whole subtrees past the key are rejected without
    /// descending; only the boundary child is entered.
    pub fn find_ord(&self, h: &Option<Handle<O>>, key: &O, less: impl Fn(&O, &O) -> bool) -> usize {
        let Some(h) = h.as_ref() else { return 0 };
        if less(key, &h.leftmost) {
            return 0;
        }
        let mut slot = h.slot;
        let mut base = 0usize;
        loop {
            match self.arena.read(slot) {
                Node::Leaf(elems) => {
                    for (i, e) in elems.iter().enumerate().rev() {
                        if !less(key, &self.ordinal(e)) {
                            return base + i + 1;
                        }
                    }
                    return base;
                }
                Node::Inner { children, .. } => {
                    let mut idx = 0;
                    for (i, c) in children.iter().enumerate().rev() {
                        if !less(key, &c.leftmost) {
                            idx = i;
                            break;
                        }
                    }
                    base += children[..idx].iter().map(|c| c.size).sum::<usize>();
                    slot = children[idx].slot;
                }
            }
        }
    }

    /// Replaces the `n`-th leaf element in place. Sizes are unchanged;
    /// leftmost-ordinal caches are refreshed along the descent wherever
    /// the replaced element was a subtree's first leaf. The range check
    /// happens before any mutation.
    pub fn set_nth(&mut self, h: &mut Option<Handle<O>>, n: usize, value: E) -> Result<(), TreeError> {
        let size = self.length(h);
        if n < 1 || n > size {
            return Err(TreeError::OutOfRange { index: n, size });
        }
        let root = h.as_mut().expect("nonzero size");
        if let Some(ord) = self.set_in(root.slot, n, value) {
            root.leftmost = ord;
        }
        Ok(())
    }

    /// Returns the subtree's new leftmost ordinal when `n == 1`.
    fn set_in(&mut self, slot: SlotId, n: usize, value: E) -> Option<O> {
        let (child_slot, rem, idx) = match self.arena.read(slot) {
            Node::Leaf(_) => {
                let ord = (n == 1).then(|| self.ordinal(&value));
                let Node::Leaf(elems) = self.arena.read_mut(slot) else {
                    unreachable!()
                };
                elems[n - 1] = value;
                return ord;
            }
            Node::Inner { children, .. } => {
                let (i, r) = prefix_find(children, n);
                (children[i - 1].slot, r, i - 1)
            }
        };
        let new_left = self.set_in(child_slot, rem, value)?;
        let Node::Inner { children, .. } = self.arena.read_mut(slot) else {
            unreachable!()
        };
        children[idx].leftmost = new_left.clone();
        (n == 1).then_some(new_left)
    }
}
