//! Recursive teardown.

use crate::handle::Handle;
use crate::store::{Node, SlotId};
use crate::BigList;

impl<E, O, F> BigList<E, O, F>
where
    O: Clone,
    F: Fn(&E) -> O,
{
    /// Tears down `h`, freeing every reachable slot post-order. An empty
    /// handle is a tolerated no-op.
    pub fn kill(&mut self, h: Option<Handle<O>>) {
        self.kill_with(h, |_| {});
    }

    /// Like [`kill`](Self::kill), invoking `on_element` once per leaf
    /// element as its block is destroyed.
    pub fn kill_with(&mut self, h: Option<Handle<O>>, mut on_element: impl FnMut(E)) {
        if let Some(h) = h {
            self.kill_rec(h.slot, &mut on_element);
        }
    }

    fn kill_rec(&mut self, slot: SlotId, on_element: &mut impl FnMut(E)) {
        match self.arena.take(slot) {
            Node::Leaf(elems) => {
                for e in elems {
                    on_element(e);
                }
            }
            Node::Inner { children, .. } => {
                for c in children {
                    self.kill_rec(c.slot, on_element);
                }
            }
        }
        self.arena.free(slot);
    }
}
