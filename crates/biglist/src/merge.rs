//! Merge engine: fuses two trees of possibly different height, plus the
//! right-append specialisation and root scrunching.

use crate::handle::Handle;
use crate::store::Node;
use crate::BigList;

impl<E, O, F> BigList<E, O, F>
where
    O: Clone,
    F: Fn(&E) -> O,
{
    /// Concatenates two trees. Ownership of both operands transfers in;
    /// the result owns every surviving slot. The operands must be
    /// disjoint — passing overlapping handles is a contract violation.
    pub fn merge(&mut self, l: Option<Handle<O>>, r: Option<Handle<O>>) -> Option<Handle<O>> {
        match (l, r) {
            (None, r) => r,
            (l, None) => l,
            (Some(l), Some(r)) => Some(self.merge_trees(l, r)),
        }
    }

    pub(crate) fn merge_trees(&mut self, l: Handle<O>, r: Handle<O>) -> Handle<O> {
        let hl = self.arena.read(l.slot).height();
        let hr = self.arena.read(r.slot).height();
        let merged = if hl > hr {
            self.rmerge(l, hl, r, hr)
        } else {
            let l = self.wrap_to(l, hl, hr);
            let mut out = self.smerge(l, r);
            if out.len() == 1 {
                out.pop().expect("length checked")
            } else {
                let top = self.arena.read(out[0].slot).height();
                self.new_inner(top + 1, out)
            }
        };
        self.scrunch(merged)
    }

    /// Heightens `h` from `from` to `to` by wrapping it in single-child
    /// parents. The wrappers sit on a rightmost edge or are consumed by
    /// the seam fusion that follows.
    pub(crate) fn wrap_to(&mut self, mut h: Handle<O>, from: usize, to: usize) -> Handle<O> {
        for k in from + 1..=to {
            h = self.new_inner(k, vec![h]);
        }
        h
    }

    /// Fuses two equal-height siblings, `l` left of `r`. Returns one ref
    /// when the pair collapses into `l`'s slot (freeing `r`'s), two when
    /// both survive.
    ///
    /// At height 0 a left leaf that already meets `min_fanout` is left
    /// untouched even if `r` is under-full. That skip is deliberate: it
    /// stops every append from cascading a rebalance up the seam, and it
    /// is safe because the callers that feed an under-full `r` in here
    /// ([`BigList::insert_last`] via rmerge) place `r` on the tree's
    /// rightmost edge, where the fanout invariant allows it.
    pub(crate) fn smerge(&mut self, l: Handle<O>, r: Handle<O>) -> Vec<Handle<O>> {
        match self.arena.take(l.slot) {
            Node::Leaf(mut la) => {
                if la.len() >= self.min_fanout() {
                    self.arena.write(l.slot, Node::Leaf(la));
                    return vec![l, r];
                }
                let Node::Leaf(mut ra) = self.arena.take(r.slot) else {
                    unreachable!("smerge height mismatch")
                };
                if la.len() + ra.len() > self.max_fanout {
                    // transfer a prefix of r so both sides are valid
                    let move_n = (la.len() + ra.len() + 1) / 2 - la.len();
                    la.extend(ra.drain(..move_n));
                    self.arena.write(l.slot, Node::Leaf(la));
                    self.arena.write(r.slot, Node::Leaf(ra));
                    vec![self.summarize(l.slot), self.summarize(r.slot)]
                } else {
                    la.append(&mut ra);
                    self.arena.write(l.slot, Node::Leaf(la));
                    self.arena.free(r.slot);
                    vec![self.summarize(l.slot)]
                }
            }
            Node::Inner { height, mut children } => {
                let Node::Inner {
                    children: mut rc, ..
                } = self.arena.take(r.slot)
                else {
                    unreachable!("smerge height mismatch")
                };
                // fuse the seam: l's rightmost child against r's leftmost
                let seam_l = children.pop().expect("inner node with no children");
                let seam_r = rc.remove(0);
                let fused = self.smerge(seam_l, seam_r);
                children.extend(fused);
                children.append(&mut rc);
                if children.len() > self.max_fanout {
                    let rest = children.split_off((children.len() + 1) / 2);
                    self.arena.write(l.slot, Node::Inner { height, children });
                    self.arena.write(
                        r.slot,
                        Node::Inner {
                            height,
                            children: rest,
                        },
                    );
                    vec![self.summarize(l.slot), self.summarize(r.slot)]
                } else {
                    self.arena.write(l.slot, Node::Inner { height, children });
                    self.arena.free(r.slot);
                    vec![self.summarize(l.slot)]
                }
            }
        }
    }

    /// Appends `ins` (strictly shorter than `tree`) at the right end of
    /// `tree` by descending the right spine to `ins`'s height, fusing
    /// there and carrying any overflow node back up, B-tree style. A new
    /// root is made when the top level overflows.
    fn rmerge(&mut self, tree: Handle<O>, tree_h: usize, ins: Handle<O>, ins_h: usize) -> Handle<O> {
        debug_assert!(tree_h > ins_h);
        let (root, carry) = self.rmerge_rec(tree, tree_h, ins, ins_h);
        match carry {
            None => root,
            Some(c) => self.new_inner(tree_h + 1, vec![root, c]),
        }
    }

    fn rmerge_rec(
        &mut self,
        nd: Handle<O>,
        height: usize,
        ins: Handle<O>,
        ins_h: usize,
    ) -> (Handle<O>, Option<Handle<O>>) {
        let Node::Inner { mut children, .. } = self.arena.take(nd.slot) else {
            unreachable!("right spine ended above the insert height")
        };
        let last = children.pop().expect("inner node with no children");
        if height - 1 == ins_h {
            children.extend(self.smerge(last, ins));
        } else {
            let (last, carry) = self.rmerge_rec(last, height - 1, ins, ins_h);
            children.push(last);
            children.extend(carry);
        }
        let carry = if children.len() > self.max_fanout {
            let rest = children.split_off((children.len() + 1) / 2);
            Some(self.new_inner(height, rest))
        } else {
            None
        };
        self.arena.write(nd.slot, Node::Inner { height, children });
        (self.summarize(nd.slot), carry)
    }

    /// Discards redundant single-child root layers, freeing their slots,
    /// until the root has more than one child or is a leaf.
    pub fn scrunch(&mut self, mut h: Handle<O>) -> Handle<O> {
        loop {
            let single = matches!(
                self.arena.read(h.slot),
                Node::Inner { children, .. } if children.len() == 1
            );
            if !single {
                return h;
            }
            let Node::Inner { mut children, .. } = self.arena.take(h.slot) else {
                unreachable!()
            };
            self.arena.free(h.slot);
            h = children.pop().expect("length checked");
        }
    }
}
