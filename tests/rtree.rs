//! R-tree scenarios: intersection correctness over a small fixture, and a
//! large insert-then-remove-in-order collapse.

mod support;

use support::{assert_rtree_consistent, build_range_tree, Range};

fn fixture(order: usize) -> support::RangeTree {
    let mut tree = build_range_tree(order);
    let ranges = [
        (0, 0, 5),
        (1, 3, 8),
        (2, 10, 15),
        (3, 12, 20),
        (4, 1, 2),
        (5, 50, 60),
        (6, 55, 58),
        (7, 0, 100),
        (8, 20, 25),
        (9, 24, 30),
        (10, 40, 45),
        (11, 42, 48),
        (12, 7, 11),
        (13, 90, 95),
        (14, 33, 37),
        (15, 16, 19),
    ];
    for (id, start, end) in ranges {
        tree.add(Range { id, start, end });
    }
    tree
}

#[test]
fn intersection_finds_every_overlapping_value() {
    let tree = fixture(3);
    assert_eq!(tree.size(), 16);
    assert_rtree_consistent(&tree);

    let query = Range { id: u64::MAX, start: 9, end: 16 };
    let mut hit_ids: Vec<u64> = Vec::new();
    tree.intersect(&query, &mut |v| hit_ids.push(v.id));
    hit_ids.sort_unstable();

    // Overlaps [9, 16): ranges whose [start, end) intersects it.
    let mut expected: Vec<u64> = fixture(3)
        .get_all_collect()
        .into_iter()
        .filter(|r| r.start < query.end && query.start < r.end)
        .map(|r| r.id)
        .collect();
    expected.sort_unstable();

    assert_eq!(hit_ids, expected);
}

#[test]
fn contains_query_matches_a_fully_covering_box() {
    let tree = fixture(3);
    let query = Range { id: u64::MAX, start: 0, end: 100 };
    let mut count = 0;
    tree.intersect(&query, &mut |_| count += 1);
    assert_eq!(count, 16, "a box covering everything must hit every value");
}

#[test]
fn remove_by_key_shrinks_size_and_index() {
    let mut tree = fixture(3);
    let removed = tree.remove(&7).unwrap();
    assert_eq!(removed.id, 7);
    assert_eq!(tree.size(), 15);
    assert!(tree.get(&7).is_none());
    assert_rtree_consistent(&tree);
}

#[test]
fn add_with_duplicate_key_replaces_value() {
    let mut tree = fixture(3);
    let old = tree.add(Range { id: 0, start: 200, end: 210 });
    assert_eq!(old, Some(Range { id: 0, start: 0, end: 5 }));
    assert_eq!(tree.size(), 16, "replacing an existing key must not grow size");
    assert_eq!(tree.get(&0), Some(&Range { id: 0, start: 200, end: 210 }));
    assert_rtree_consistent(&tree);
}

#[test]
fn large_insert_then_ordered_removal_collapses_to_empty() {
    const N: u64 = 150_000;
    let mut tree = build_range_tree(16);
    for id in 0..N {
        tree.add(Range { id, start: id, end: id + 1 });
    }
    assert_eq!(tree.size(), N as usize);
    assert!(tree.height() > 0);

    for id in 0..N {
        let removed = tree.remove(&id);
        assert!(removed.is_some(), "missing id {id}");
    }

    assert_eq!(tree.size(), 0);
    assert_eq!(tree.height(), 0);
    assert!(tree.is_empty());
    assert_rtree_consistent(&tree);
}

#[test]
fn order_below_minimum_is_rejected() {
    // `RangeTree` has no `Debug` impl, so `unwrap_err` (which requires one
    // on the `Ok` side) doesn't apply here; `err().unwrap()` does.
    let err = support::RangeTree::with_order(2, |v: &Range| v.id, |v: &Range| *v)
        .err()
        .unwrap();
    assert!(matches!(err, balanced_trees::BPlusTreeError::InvalidCapacity(_)));
}

trait CollectAll {
    fn get_all_collect(&self) -> Vec<Range>;
}

impl CollectAll for support::RangeTree {
    fn get_all_collect(&self) -> Vec<Range> {
        let mut out = Vec::new();
        self.get_all(&mut |v| out.push(*v));
        out
    }
}
