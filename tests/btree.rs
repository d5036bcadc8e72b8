//! Long-keyed (u64, inclusive-end) B+-tree scenarios.

mod support;

use balanced_trees::LongTreeMap;
use support::assert_btree_consistent;

#[test]
fn insert_then_range_then_drain() {
    let mut tree: LongTreeMap<u64> = LongTreeMap::with_order(4).expect("order 4 is valid");

    for k in 0..16u64 {
        let old = tree.put(k, k * 10);
        assert_eq!(old, None);
    }
    assert_eq!(tree.size(), 16);
    assert!(tree.height() <= 2, "height grew past the order-4 budget: {}", tree.height());
    assert_btree_consistent(&tree);

    // Inclusive upper end: range(4, 12) covers keys 4..=12, nine values.
    let collected: Vec<u64> = tree
        .range(Some(4), Some(12))
        .expect("4 <= 12")
        .map(|(k, _)| *k)
        .collect();
    assert_eq!(collected, (4..=12).collect::<Vec<_>>());

    for k in 0..16u64 {
        let removed = tree.remove(&k);
        assert_eq!(removed, Some(k * 10));
        assert_btree_consistent(&tree);
    }
    assert_eq!(tree.size(), 0);
    assert!(tree.is_empty());
    assert_eq!(tree.height(), 0);
}

#[test]
fn overwrite_returns_previous_value() {
    let mut tree: LongTreeMap<&'static str> = LongTreeMap::new();
    assert_eq!(tree.put(1, "a"), None);
    assert_eq!(tree.put(1, "b"), Some("a"));
    assert_eq!(tree.get(&1), Some(&"b"));
    assert_eq!(tree.size(), 1);
}

#[test]
fn remove_miss_is_a_noop() {
    let mut tree: LongTreeMap<u64> = LongTreeMap::new();
    tree.put(5, 50);
    assert_eq!(tree.remove(&999), None);
    assert_eq!(tree.size(), 1);
}

#[test]
fn range_rejects_inverted_bounds() {
    let tree: LongTreeMap<u64> = LongTreeMap::new();
    // `unwrap_err` requires the `Ok` side to implement `Debug`; neither
    // `RangeIter` nor `BPlusTree` does, so these go through `err().unwrap()`
    // instead, which only needs the `Err` side.
    let err = tree.range(Some(10), Some(3)).err().unwrap();
    assert_eq!(err, balanced_trees::BPlusTreeError::RangeOrder);
}

#[test]
fn order_below_minimum_is_rejected() {
    let err = LongTreeMap::<u64>::with_order(2).err().unwrap();
    assert!(matches!(err, balanced_trees::BPlusTreeError::InvalidCapacity(_)));
}

#[test]
fn reverse_deletion_order_also_collapses_cleanly() {
    let mut tree = support::build_long_tree(4, 30);
    for k in (0..30u64).rev() {
        tree.remove(&k);
        assert_btree_consistent(&tree);
    }
    assert_eq!(tree.size(), 0);
    assert_eq!(tree.height(), 0);
}
