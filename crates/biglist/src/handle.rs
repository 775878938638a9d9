//! External tree references and the child refs cached inside inner nodes.

use crate::store::SlotId;

/// Reference to a (sub)tree: root slot plus cached leaf count and the
/// ordinal of the leftmost leaf. Children of an inner node are handles of
/// their subtrees, so the same shape serves both roles.
///
/// A handle exclusively owns every slot reachable from `slot`. `Handle`
/// is not `Clone`: structural operations take handles by
/// value and hand ownership back through their return values, so two live
/// handles never share a subtree. The empty tree is `None` at the API
/// surface.
#[derive(Debug)]
pub struct Handle<O> {
    pub(crate) slot: SlotId,
    pub(crate) size: usize,
    pub(crate) leftmost: O,
}

impl<O> Handle<O> {
    pub(crate) fn new(slot: SlotId, size: usize, leftmost: O) -> Self {
        Self {
            slot,
            size,
            leftmost,
        }
    }

    /// Number of leaves reachable from this handle.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Ordinal of the first leaf.
    pub fn leftmost(&self) -> &O {
        &self.leftmost
    }
}
