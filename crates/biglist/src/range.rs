//! Bulk range operations, composed from split, merge and scrunch.
//!
//! All bounds are 1-based and clamped to `[1, size]`. The subtree
//! operands of the insert operations must be disjoint from the base tree;
//! overlapping handles are a contract violation, not a recoverable error.

use crate::handle::Handle;
use crate::BigList;

impl<E, O, F> BigList<E, O, F>
where
    O: Clone,
    F: Fn(&E) -> O,
{
    /// Extracts leaves `first..=last` into their own tree, returning
    /// `(remainder, extracted)`. An empty range returns the tree
    /// untouched; the full range moves it wholesale.
    pub fn extract_range(
        &mut self,
        h: Option<Handle<O>>,
        first: usize,
        last: usize,
    ) -> (Option<Handle<O>>, Option<Handle<O>>) {
        let size = self.length(&h);
        let first = first.max(1);
        let last = last.min(size);
        if first > last {
            return (h, None);
        }
        let h = h.expect("nonempty range implies a nonempty tree");
        if first == 1 && last == size {
            return (None, Some(h));
        }
        let (mid, right_rem) = if last < size {
            let (a, b) = self.split_tree(h, last);
            (a, Some(b))
        } else {
            (h, None)
        };
        let (left_rem, extracted) = if first > 1 {
            let (a, b) = self.split_tree(mid, first - 1);
            (Some(a), b)
        } else {
            (None, mid)
        };
        let remainder = self.merge(left_rem, right_rem);
        (remainder, Some(extracted))
    }

    /// Removes leaves `first..=last`, returning the remainder.
    pub fn delete_range(
        &mut self,
        h: Option<Handle<O>>,
        first: usize,
        last: usize,
    ) -> Option<Handle<O>> {
        let (remainder, extracted) = self.extract_range(h, first, last);
        self.kill(extracted);
        remainder
    }

    /// Like [`delete_range`](Self::delete_range), invoking `on_element`
    /// once per removed element.
    pub fn delete_range_with(
        &mut self,
        h: Option<Handle<O>>,
        first: usize,
        last: usize,
        on_element: impl FnMut(E),
    ) -> Option<Handle<O>> {
        let (remainder, extracted) = self.extract_range(h, first, last);
        self.kill_with(extracted, on_element);
        remainder
    }

    /// Keeps only leaves `first..=last`, destroying the rest.
    pub fn keep_range(
        &mut self,
        h: Option<Handle<O>>,
        first: usize,
        last: usize,
    ) -> Option<Handle<O>> {
        let (remainder, extracted) = self.extract_range(h, first, last);
        self.kill(remainder);
        extracted
    }

    /// Like [`keep_range`](Self::keep_range), invoking `on_element` once
    /// per destroyed element.
    pub fn keep_range_with(
        &mut self,
        h: Option<Handle<O>>,
        first: usize,
        last: usize,
        on_element: impl FnMut(E),
    ) -> Option<Handle<O>> {
        let (remainder, extracted) = self.extract_range(h, first, last);
        self.kill_with(remainder, on_element);
        extracted
    }

    /// Inserts `sub` immediately before the `n`-th leaf of `h`. Positions
    /// at or before the first leaf prepend; past the last leaf append.
    pub fn insert_before(&mut self, h: Option<Handle<O>>, sub: Handle<O>, n: usize) -> Handle<O> {
        let size = self.length(&h);
        let Some(h) = h else { return sub };
        if n <= 1 {
            return self.merge_trees(sub, h);
        }
        if n > size {
            return self.merge_trees(h, sub);
        }
        let (l, r) = self.split_tree(h, n - 1);
        let l = self.merge_trees(l, sub);
        self.merge_trees(l, r)
    }

    /// Inserts `sub` immediately after the `n`-th leaf of `h`.
    pub fn insert_after(&mut self, h: Option<Handle<O>>, sub: Handle<O>, n: usize) -> Handle<O> {
        let size = self.length(&h);
        let Some(h) = h else { return sub };
        if n < 1 {
            return self.merge_trees(sub, h);
        }
        if n >= size {
            return self.merge_trees(h, sub);
        }
        let (l, r) = self.split_tree(h, n);
        let l = self.merge_trees(l, sub);
        self.merge_trees(l, r)
    }
}
