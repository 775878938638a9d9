//! Right-edge append fast path.

use crate::handle::Handle;
use crate::store::{Node, SlotId};
use crate::BigList;

impl<E, O, F> BigList<E, O, F>
where
    O: Clone,
    F: Fn(&E) -> O,
{
    /// Appends `value` as the new last leaf in O(height), avoiding the
    /// full split/merge machinery: walk the right spine, push into the
    /// bottom node if it has room, otherwise splice a wrapped singleton
    /// at the lowest spine level that does. A new root is made when the
    /// whole spine is full.
    pub fn insert_last(&mut self, h: Option<Handle<O>>, value: E) -> Handle<O> {
        let Some(h) = h else {
            return self.new_leaf(vec![value]);
        };
        // right spine, root first: each node's slot and child count
        let mut spine: Vec<(SlotId, usize)> = Vec::new();
        let mut slot = h.slot;
        loop {
            match self.arena.read(slot) {
                Node::Leaf(elems) => {
                    spine.push((slot, elems.len()));
                    break;
                }
                Node::Inner { children, .. } => {
                    spine.push((slot, children.len()));
                    slot = children.last().expect("inner node with no children").slot;
                }
            }
        }
        let (leaf_slot, leaf_len) = *spine.last().expect("spine holds at least the root");
        if leaf_len < self.max_fanout {
            let Node::Leaf(elems) = self.arena.read_mut(leaf_slot) else {
                unreachable!()
            };
            elems.push(value);
            self.bump_sizes(&spine[..spine.len() - 1]);
            return Handle::new(h.slot, h.size + 1, h.leftmost);
        }
        // leaf full: wrap the value as a singleton chain and splice it in
        // at the lowest under-full level of the spine
        let singleton = self.new_leaf(vec![value]);
        for depth in (0..spine.len() - 1).rev() {
            let (slot, count) = spine[depth];
            let node_h = spine.len() - 1 - depth;
            if count < self.max_fanout {
                let carry = self.wrap_to(singleton, 0, node_h - 1);
                let Node::Inner { children, .. } = self.arena.read_mut(slot) else {
                    unreachable!()
                };
                children.push(carry);
                self.bump_sizes(&spine[..depth]);
                return Handle::new(h.slot, h.size + 1, h.leftmost);
            }
        }
        // every spine level was full: grow a new root
        let root_h = spine.len() - 1;
        let carry = self.wrap_to(singleton, 0, root_h);
        self.new_inner(root_h + 1, vec![h, carry])
    }

    /// Adds one leaf to the cached size of the last child of each spine
    /// node, top down.
    fn bump_sizes(&mut self, spine: &[(SlotId, usize)]) {
        for &(slot, _) in spine {
            let Node::Inner { children, .. } = self.arena.read_mut(slot) else {
                unreachable!()
            };
            children.last_mut().expect("inner node with no children").size += 1;
        }
    }
}
