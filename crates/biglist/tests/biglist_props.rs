//! Model-based properties: every sequence of tree operations must agree
//! with the same sequence applied to a plain `Vec`, and the structural
//! invariants must hold after each step.

use biglist::{BigList, Handle};
use proptest::prelude::*;

fn fanouts() -> impl Strategy<Value = usize> {
    // low bounds force deep trees and more rebalancing corner cases
    4usize..=8
}

fn build<F: Fn(&i64) -> i64>(
    list: &mut BigList<i64, i64, F>,
    xs: &[i64],
) -> Option<Handle<i64>> {
    let mut h = None;
    for &x in xs {
        h = Some(list.insert_last(h, x));
    }
    h
}

fn collect<F: Fn(&i64) -> i64>(list: &BigList<i64, i64, F>, h: &Option<Handle<i64>>) -> Vec<i64> {
    list.blocks(h, 1, list.length(h)).flatten().copied().collect()
}

proptest! {
    #[test]
    fn append_matches_model(
        xs in prop::collection::vec(-1000i64..1000, 0..300),
        fanout in fanouts(),
    ) {
        let mut list = BigList::with_fanout(fanout, |e: &i64| *e);
        let h = build(&mut list, &xs);
        list.check_invariants(&h);
        prop_assert_eq!(list.length(&h), xs.len());
        for (i, &x) in xs.iter().enumerate() {
            prop_assert_eq!(*list.find_nth(&h, i + 1).unwrap(), x);
        }
        prop_assert_eq!(collect(&list, &h), xs);
        list.kill(h);
        prop_assert_eq!(list.live_nodes(), 0);
    }

    #[test]
    fn delete_range_matches_model(
        xs in prop::collection::vec(-1000i64..1000, 1..250),
        cuts in prop::collection::vec((0usize..260, 0usize..40), 1..8),
        fanout in fanouts(),
    ) {
        let mut list = BigList::with_fanout(fanout, |e: &i64| *e);
        let mut model = xs.clone();
        let mut h = build(&mut list, &xs);
        for &(start, width) in &cuts {
            let first = start + 1;
            let last = start + width;
            let mut removed = Vec::new();
            h = list.delete_range_with(h, first, last, |e| removed.push(e));
            list.check_invariants(&h);

            let mfirst = first.min(model.len() + 1);
            let mlast = last.min(model.len());
            let expected: Vec<i64> = if mfirst <= mlast {
                model.drain(mfirst - 1..mlast).collect()
            } else {
                Vec::new()
            };
            prop_assert_eq!(&removed, &expected);
            prop_assert_eq!(collect(&list, &h), model.clone());
        }
        list.kill(h);
        prop_assert_eq!(list.live_nodes(), 0);
    }

    #[test]
    fn insert_before_matches_model(
        xs in prop::collection::vec(-1000i64..1000, 0..200),
        ins in prop::collection::vec(
            (0usize..220, prop::collection::vec(-1000i64..1000, 1..12)),
            1..6,
        ),
        fanout in fanouts(),
    ) {
        let mut list = BigList::with_fanout(fanout, |e: &i64| *e);
        let mut model = xs.clone();
        let mut h = build(&mut list, &xs);
        for (n, sub_elems) in &ins {
            let sub = build(&mut list, sub_elems).unwrap();
            h = Some(list.insert_before(h, sub, *n));
            list.check_invariants(&h);

            let at = n.saturating_sub(1).min(model.len());
            let tail: Vec<i64> = model.split_off(at);
            model.extend(sub_elems.iter().copied());
            model.extend(tail);
            prop_assert_eq!(collect(&list, &h), model.clone());
        }
        list.kill(h);
        prop_assert_eq!(list.live_nodes(), 0);
    }

    #[test]
    fn extract_reinsert_round_trips(
        xs in prop::collection::vec(-1000i64..1000, 1..200),
        picks in prop::collection::vec(0usize..200, 1..10),
        fanout in fanouts(),
    ) {
        let mut list = BigList::with_fanout(fanout, |e: &i64| *e);
        let mut h = build(&mut list, &xs);
        for &p in &picks {
            let i = p % xs.len() + 1;
            let (rem, ext) = list.extract_range(h, i, i);
            let ext = ext.unwrap();
            prop_assert_eq!(ext.size(), 1);
            h = Some(list.insert_before(rem, ext, i));
            list.check_invariants(&h);
            prop_assert_eq!(collect(&list, &h), xs.clone());
        }
        list.kill(h);
        prop_assert_eq!(list.live_nodes(), 0);
    }

    #[test]
    fn find_ord_agrees_with_sorted_model(
        mut xs in prop::collection::vec(-100i64..100, 0..250),
        keys in prop::collection::vec(-120i64..120, 1..40),
        fanout in fanouts(),
    ) {
        xs.sort_unstable();
        let mut list = BigList::with_fanout(fanout, |e: &i64| *e);
        let h = build(&mut list, &xs);
        let less = |a: &i64, b: &i64| a < b;
        let mut keys = keys;
        keys.sort_unstable();
        let mut prev_rank = 0;
        for &k in &keys {
            let rank = list.find_ord(&h, &k, less);
            prop_assert_eq!(rank, xs.iter().filter(|&&e| e <= k).count());
            // non-decreasing in the key
            prop_assert!(rank >= prev_rank);
            prev_rank = rank;
        }
        list.kill(h);
    }

    #[test]
    fn set_nth_matches_model(
        xs in prop::collection::vec(-1000i64..1000, 1..200),
        writes in prop::collection::vec((0usize..200, -1000i64..1000), 1..20),
        fanout in fanouts(),
    ) {
        let mut list = BigList::with_fanout(fanout, |e: &i64| *e);
        let mut model = xs.clone();
        let mut h = build(&mut list, &xs);
        for &(p, v) in &writes {
            let n = p % model.len() + 1;
            list.set_nth(&mut h, n, v).unwrap();
            model[n - 1] = v;
            list.check_invariants(&h);
            prop_assert_eq!(list.length(&h), model.len());
        }
        prop_assert_eq!(collect(&list, &h), model);
        list.kill(h);
    }

    #[test]
    fn block_iteration_matches_model_slices(
        xs in prop::collection::vec(-1000i64..1000, 1..250),
        ranges in prop::collection::vec((0usize..260, 0usize..260), 1..10),
        fanout in fanouts(),
    ) {
        let mut list = BigList::with_fanout(fanout, |e: &i64| *e);
        let h = build(&mut list, &xs);
        for &(a, b) in &ranges {
            let seen: Vec<i64> = list.blocks(&h, a, b).flatten().copied().collect();
            let first = a.max(1);
            let last = b.min(xs.len());
            let expected: Vec<i64> = if first <= last {
                xs[first - 1..last].to_vec()
            } else {
                Vec::new()
            };
            prop_assert_eq!(seen, expected);
        }
        list.kill(h);
    }

    #[test]
    fn keep_range_matches_model(
        xs in prop::collection::vec(-1000i64..1000, 1..250),
        first in 0usize..260,
        width in 0usize..260,
        fanout in fanouts(),
    ) {
        let mut list = BigList::with_fanout(fanout, |e: &i64| *e);
        let h = build(&mut list, &xs);
        let h = list.keep_range(h, first, first.saturating_add(width));
        list.check_invariants(&h);
        let lo = first.max(1);
        let hi = first.saturating_add(width).min(xs.len());
        let expected: Vec<i64> = if lo <= hi { xs[lo - 1..hi].to_vec() } else { Vec::new() };
        prop_assert_eq!(collect(&list, &h), expected);
        list.kill(h);
        prop_assert_eq!(list.live_nodes(), 0);
    }
}
