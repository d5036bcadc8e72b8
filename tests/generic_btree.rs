//! Generic-keyed (exclusive-end) B+-tree scenarios, plus `compute_if_absent`
//! and caller-fault cases.

mod support;

use balanced_trees::{BPlusTreeError, TreeMap};
use support::assert_btree_consistent;

#[test]
fn insert_then_unbounded_prefix_range() {
    let mut tree: TreeMap<u64, u64> = TreeMap::with_order(8).expect("order 8 is valid");
    for k in 0..64u64 {
        tree.put(k, k);
    }
    assert_eq!(tree.size(), 64);
    assert_btree_consistent(&tree);

    // Exclusive upper end: range(None, 16) covers keys 0..16, sixteen values.
    let collected: Vec<u64> = tree.range(None, Some(16)).unwrap().map(|(k, _)| *k).collect();
    assert_eq!(collected, (0..16).collect::<Vec<_>>());

    // Unbounded-start, unbounded-end range is the whole tree, in order.
    let all: Vec<u64> = tree.iter().map(|(k, _)| *k).collect();
    assert_eq!(all, (0..64).collect::<Vec<_>>());
}

#[test]
fn string_keyed_tree_orders_lexically() {
    let mut tree: TreeMap<&'static str, u32> = TreeMap::with_order(4).unwrap();
    for (i, w) in ["pear", "apple", "kiwi", "banana", "fig"].into_iter().enumerate() {
        tree.put(w, i as u32);
    }
    let keys: Vec<&str> = tree.iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, vec!["apple", "banana", "fig", "kiwi", "pear"]);
}

#[test]
fn compute_if_absent_inserts_once() {
    let mut tree: TreeMap<u32, u32> = TreeMap::new();
    let mut calls = 0;
    {
        let v = tree
            .compute_if_absent(1, Some(|| {
                calls += 1;
                Some(100)
            }))
            .unwrap();
        assert_eq!(*v, 100);
    }
    {
        let v = tree
            .compute_if_absent(1, Some(|| {
                calls += 1;
                Some(999)
            }))
            .unwrap();
        assert_eq!(*v, 100, "second call must not re-invoke the supplier");
    }
    assert_eq!(calls, 1);
}

#[test]
fn compute_if_absent_rejects_null_supplier() {
    let mut tree: TreeMap<u32, u32> = TreeMap::new();
    let err = tree.compute_if_absent::<fn() -> Option<u32>>(1, None).unwrap_err();
    assert!(matches!(err, BPlusTreeError::NullValue(_)));
    assert!(tree.get(&1).is_none());
}

#[test]
fn compute_if_absent_rejects_null_returning_supplier() {
    let mut tree: TreeMap<u32, u32> = TreeMap::new();
    let err = tree.compute_if_absent(1, Some(|| None)).unwrap_err();
    assert!(matches!(err, BPlusTreeError::NullValue(_)));
    assert!(tree.get(&1).is_none());
}

#[test]
fn range_rejects_inverted_bounds() {
    let tree: TreeMap<u32, u32> = TreeMap::new();
    // `RangeIter` has no `Debug` impl, so `unwrap_err` (which requires one
    // on the `Ok` side) doesn't apply here; `err().unwrap()` does.
    assert_eq!(tree.range(Some(5), Some(3)).err().unwrap(), BPlusTreeError::RangeOrder);
}

#[test]
fn nullable_values_are_modeled_as_option() {
    // `put(key, null)` has no analogue here; a tree over optional values
    // uses `V = Option<T>` directly instead.
    let mut tree: TreeMap<u32, Option<&'static str>> = TreeMap::new();
    tree.put(1, None);
    tree.put(2, Some("present"));
    assert_eq!(tree.get(&1), Some(&None));
    assert_eq!(tree.get(&2), Some(&Some("present")));
    assert_eq!(tree.size(), 2);
}
