//! Split engine: cuts a tree after a given leaf.
//!
//! The node on the cut path at each height is truncated in place, keeping
//! its slot, so the left tree's cached ancestry stays valid; the peeled
//! right-hand pieces are re-joined through the merge engine, which grafts
//! each under-full cut fragment onto its nearest right neighbour at the
//! same height (or steals from it) exactly where one exists. Fragments
//! with no right neighbour stay small on the right edge of the split-off
//! tree, where the fanout invariant permits it.

use crate::handle::Handle;
use crate::navigate::prefix_find;
use crate::store::Node;
use crate::BigList;

impl<E, O, F> BigList<E, O, F>
where
    O: Clone,
    F: Fn(&E) -> O,
{
    /// Splits `h` after its `p`-th leaf into two disjoint trees,
    /// `1 <= p < h.size`. Both results are scrunched; all size and
    /// leftmost caches are recomputed from the boundary.
    pub(crate) fn split_tree(&mut self, h: Handle<O>, p: usize) -> (Handle<O>, Handle<O>) {
        debug_assert!(p >= 1 && p < h.size, "split point outside the tree");
        let total = h.size;
        let mut peeled = Vec::new();
        let left = self.cut(h, p, &mut peeled);
        let left = self.scrunch(left);
        // peeled holds the right-hand pieces tallest first; fold them
        // back together deepest first, which is sequence order
        let mut right: Option<Handle<O>> = None;
        while let Some(t) = peeled.pop() {
            right = Some(match right {
                None => t,
                Some(acc) => self.merge_trees(acc, t),
            });
        }
        let right = right.expect("a proper split point always peels something");
        // a lone peeled piece can be a single-child spine wrapper
        let right = self.scrunch(right);
        debug_assert_eq!(left.size + right.size, total);
        (left, right)
    }

    /// Truncates the subtree at `nd` to its first `p` leaves in place and
    /// returns the updated ref. Every peeled-off right-hand piece is
    /// appended to `peeled` (tallest first): the tail children right of
    /// the cut path at each height, and finally the cut-off part of the
    /// leaf the split point lands in.
    fn cut(&mut self, nd: Handle<O>, p: usize, peeled: &mut Vec<Handle<O>>) -> Handle<O> {
        match self.arena.take(nd.slot) {
            Node::Leaf(mut elems) => {
                let rest = elems.split_off(p);
                self.arena.write(nd.slot, Node::Leaf(elems));
                let frag = self.new_leaf(rest);
                peeled.push(frag);
                Handle::new(nd.slot, p, nd.leftmost)
            }
            Node::Inner { height, mut children } => {
                let (i, r) = prefix_find(&children, p);
                let idx = i - 1;
                let mut tail = children.split_off(idx + 1);
                if !tail.is_empty() {
                    let t = if tail.len() == 1 {
                        tail.pop().expect("length checked")
                    } else {
                        self.new_inner(height, tail)
                    };
                    peeled.push(t);
                }
                if r < children[idx].size {
                    // the split point falls inside the last kept child
                    let straddler = children.pop().expect("prefix_find returned a child");
                    let left_child = self.cut(straddler, r, peeled);
                    children.push(left_child);
                }
                self.arena.write(nd.slot, Node::Inner { height, children });
                Handle::new(nd.slot, p, nd.leftmost)
            }
        }
    }
}
