//! Shared invariant checks and scenario builders for the integration tests.
//! Only exercises the public API — this crate's node internals are
//! `pub(crate)` and not visible from `tests/`.

#![allow(dead_code)]

use balanced_trees::{RTree, TreeMap};

/// Checks that `tree.iter()` yields strictly increasing keys and that its
/// length matches `tree.size()`.
pub fn assert_btree_consistent<K, V, const E: bool>(tree: &balanced_trees::BPlusTree<K, V, E>)
where
    K: Ord + Clone + core::fmt::Debug,
{
    let mut prev: Option<&K> = None;
    let mut count = 0usize;
    for (k, _) in tree.iter() {
        if let Some(p) = prev {
            assert!(p < k, "iteration order violated: {p:?} before {k:?}");
        }
        prev = Some(k);
        count += 1;
    }
    assert_eq!(count, tree.size(), "size() disagrees with iterated count");
    assert_eq!(tree.get_all().len(), tree.size());
}

/// Builds a `TreeMap<u64, u64>` (generic/exclusive-end variant) with keys
/// `0..n`, each mapped to itself.
pub fn build_generic_tree(order: usize, n: u64) -> TreeMap<u64, u64> {
    let mut tree = TreeMap::with_order(order).expect("valid order");
    for k in 0..n {
        tree.put(k, k);
    }
    tree
}

/// Builds a `LongTreeMap<u64>` (u64-keyed/inclusive-end variant) with keys
/// `0..n`.
pub fn build_long_tree(order: usize, n: u64) -> balanced_trees::LongTreeMap<u64> {
    let mut tree = balanced_trees::LongTreeMap::with_order(order).expect("valid order");
    for k in 0..n {
        tree.put(k, k);
    }
    tree
}

/// A simple axis-aligned interval `[start, end)` on `u64`, tagged with an
/// id, used as the R-tree test fixture value/box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub id: u64,
    pub start: u64,
    pub end: u64,
}

impl balanced_trees::RBox for Range {
    fn compare(&self, other: &Self) -> core::cmp::Ordering {
        self.start.cmp(&other.start).then(self.end.cmp(&other.end))
    }

    fn union(&self, other: &mut Self) {
        other.start = self.start.min(other.start);
        other.end = self.end.max(other.end);
    }

    fn intersect(&self, other: &Self) -> balanced_trees::Intersection {
        if other.start >= self.start && other.end <= self.end {
            balanced_trees::Intersection::Contains
        } else if self.start < other.end && other.start < self.end {
            balanced_trees::Intersection::Intersects
        } else {
            balanced_trees::Intersection::NoCollision
        }
    }
}

pub type RangeTree = RTree<u64, Range, Range, fn(&Range) -> u64, fn(&Range) -> Range>;

pub fn build_range_tree(order: usize) -> RangeTree {
    // Calling through the concrete `RangeTree` alias (rather than the bare
    // generic `RTree::with_order`) fixes `ToKey`/`ToBox` to the alias's
    // `fn(&Range) -> _` types before the closure arguments are checked, so
    // these non-capturing closures coerce to function pointers instead of
    // each being inferred as its own unique closure type.
    RangeTree::with_order(order, |v: &Range| v.id, |v: &Range| *v).expect("valid order")
}

/// Every value in `tree` is reachable via `get(id)` and `validate_index`
/// holds; `get_all` count matches `size()`.
pub fn assert_rtree_consistent(tree: &RangeTree) {
    tree.validate_index();
    let mut count = 0usize;
    tree.get_all(&mut |_| count += 1);
    assert_eq!(count, tree.size());
}
