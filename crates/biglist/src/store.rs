//! Slot arena — the node store behind every tree.
//!
//! Nodes live in `Vec`-backed slots addressed by `u32` ids. A slot's id is
//! stable across in-place rewrites: [`SlotArena::write`] replaces the
//! payload but not the identifier, so an ancestor's cached child reference
//! stays valid as long as the mutating operation refreshes the size and
//! ordinal caches carried alongside it.

use crate::handle::Handle;

pub type SlotId = u32;

/// Storage unit: a leaf holds raw elements, an inner node holds complete
/// sub-handles of its children.
#[derive(Debug)]
pub enum Node<E, O> {
    Leaf(Vec<E>),
    Inner {
        height: usize,
        children: Vec<Handle<O>>,
    },
}

impl<E, O> Node<E, O> {
    pub fn height(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Inner { height, .. } => *height,
        }
    }

    /// Direct child count (element count for a leaf).
    pub fn fanout(&self) -> usize {
        match self {
            Node::Leaf(elems) => elems.len(),
            Node::Inner { children, .. } => children.len(),
        }
    }
}

/// A slot is `Reserved` between [`SlotArena::take`] and the matching
/// `write` or `free`; restructuring operations hold a node's payload on
/// the stack while they allocate or rewrite other slots.
#[derive(Debug)]
enum Slot<E, O> {
    Occupied(Node<E, O>),
    Reserved,
    Free,
}

/// Node slots with stable identity across content mutation.
#[derive(Debug)]
pub struct SlotArena<E, O> {
    slots: Vec<Slot<E, O>>,
    free: Vec<SlotId>,
}

impl<E, O> Default for SlotArena<E, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, O> SlotArena<E, O> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Creates a node, returning its id. Freed ids are recycled.
    pub fn allocate(&mut self, node: Node<E, O>) -> SlotId {
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot as usize] = Slot::Occupied(node);
                slot
            }
            None => {
                self.slots.push(Slot::Occupied(node));
                (self.slots.len() - 1) as SlotId
            }
        }
    }

    /// Releases a slot. Freeing an already-free slot is a no-op.
    pub fn free(&mut self, slot: SlotId) {
        match self.slots[slot as usize] {
            Slot::Free => {}
            _ => {
                self.slots[slot as usize] = Slot::Free;
                self.free.push(slot);
            }
        }
    }

    pub fn read(&self, slot: SlotId) -> &Node<E, O> {
        match &self.slots[slot as usize] {
            Slot::Occupied(node) => node,
            _ => panic!("read of vacant slot {slot}"),
        }
    }

    pub fn read_mut(&mut self, slot: SlotId) -> &mut Node<E, O> {
        match &mut self.slots[slot as usize] {
            Slot::Occupied(node) => node,
            _ => panic!("read of vacant slot {slot}"),
        }
    }

    /// Removes the payload for restructuring, leaving the slot reserved.
    /// Every `take` must be paired with a `write` or a `free`.
    pub fn take(&mut self, slot: SlotId) -> Node<E, O> {
        match std::mem::replace(&mut self.slots[slot as usize], Slot::Reserved) {
            Slot::Occupied(node) => node,
            _ => panic!("take of vacant slot {slot}"),
        }
    }

    /// Replaces a slot's payload in place; the id is unchanged.
    pub fn write(&mut self, slot: SlotId, node: Node<E, O>) {
        self.slots[slot as usize] = Slot::Occupied(node);
    }

    /// Number of live (occupied or reserved) slots.
    pub fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_identity_survives_write() {
        let mut arena: SlotArena<i32, i32> = SlotArena::new();
        let slot = arena.allocate(Node::Leaf(vec![1, 2]));
        arena.write(slot, Node::Leaf(vec![7, 8, 9]));
        assert_eq!(arena.read(slot).fanout(), 3);
        assert_eq!(arena.live(), 1);
    }

    #[test]
    fn free_is_idempotent_and_ids_recycle() {
        let mut arena: SlotArena<i32, i32> = SlotArena::new();
        let a = arena.allocate(Node::Leaf(vec![1]));
        let b = arena.allocate(Node::Leaf(vec![2]));
        arena.free(a);
        arena.free(a);
        assert_eq!(arena.live(), 1);
        let c = arena.allocate(Node::Leaf(vec![3]));
        assert_eq!(c, a);
        assert_eq!(arena.live(), 2);
        arena.free(b);
        arena.free(c);
        assert_eq!(arena.live(), 0);
    }

    #[test]
    fn take_then_free_releases_the_slot() {
        let mut arena: SlotArena<i32, i32> = SlotArena::new();
        let a = arena.allocate(Node::Leaf(vec![1]));
        let node = arena.take(a);
        assert_eq!(node.fanout(), 1);
        arena.free(a);
        assert_eq!(arena.live(), 0);
    }
}
