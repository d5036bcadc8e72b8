//! Range iteration and whole-tree traversal (spec.md §4.2 "Range
//! iteration" and "`getAll`").

use alloc::vec::Vec;
use core::marker::PhantomData;
use core::ptr::NonNull;

use crate::error::BPlusTreeError;
use crate::BTreeResult;

use super::node::Node;
use super::BPlusTree;

/// Forward cursor over a leaf chain, positioned by [`BPlusTree::range`].
///
/// Per spec.md §4.4, nothing here holds a lock; [`crate::ConcurrentTreeMap`]
/// layers per-step locking on top by wrapping this iterator.
pub struct RangeIter<'a, K, V, const INCLUSIVE_END: bool> {
    current: Option<NonNull<Node<K, V>>>,
    idx: usize,
    end: Option<K>,
    _marker: PhantomData<&'a Node<K, V>>,
}

impl<'a, K: Ord, V, const INCLUSIVE_END: bool> Iterator for RangeIter<'a, K, V, INCLUSIVE_END> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let cur_ptr = self.current?;
            // SAFETY: `cur_ptr` always refers to a leaf node reachable
            // from (and thus kept alive by) the tree that produced this
            // iterator; the iterator borrows that tree immutably for its
            // whole lifetime `'a`, so no mutation can invalidate it.
            let node_ref: &'a Node<K, V> = unsafe { &*cur_ptr.as_ptr() };
            let leaf = node_ref.as_leaf();
            if self.idx >= leaf.keys.len() {
                self.current = leaf.next;
                self.idx = 0;
                continue;
            }
            let key = &leaf.keys[self.idx];
            if let Some(end) = &self.end {
                let in_range = if INCLUSIVE_END { key <= end } else { key < end };
                if !in_range {
                    self.current = None;
                    return None;
                }
            }
            let value = &leaf.values[self.idx];
            self.idx += 1;
            return Some((key, value));
        }
    }
}

impl<K: Ord + Clone, V, const INCLUSIVE_END: bool> BPlusTree<K, V, INCLUSIVE_END> {
    /// Iterate keys in `[start, end)` (generic variant) or `[start, end]`
    /// (long-keyed variant), per spec.md §9's documented divergence.
    /// `None` on either side means unbounded.
    pub fn range(
        &self,
        start: Option<K>,
        end: Option<K>,
    ) -> BTreeResult<RangeIter<'_, K, V, INCLUSIVE_END>> {
        if let (Some(s), Some(e)) = (&start, &end) {
            if s > e {
                return Err(BPlusTreeError::RangeOrder);
            }
        }

        let (current, idx) = match &start {
            Some(key) => match self.leaf_for_key(key) {
                Some(node) => {
                    let leaf = node.as_leaf();
                    let idx = match leaf.search(key) {
                        Ok(i) => i,
                        Err(i) => i,
                    };
                    (Some(NonNull::from(node)), idx)
                }
                None => (None, 0),
            },
            None => (self.level0, 0),
        };

        Ok(RangeIter {
            current,
            idx,
            end,
            _marker: PhantomData,
        })
    }

    /// Every entry in key order. Equivalent to `range(None, None)`.
    pub fn iter(&self) -> RangeIter<'_, K, V, INCLUSIVE_END> {
        self.range(None, None).expect("unbounded range never fails")
    }

    /// Walk the leaf chain from the leftmost leaf, collecting every live
    /// value until `size` items have been emitted.
    pub fn get_all(&self) -> Vec<(&K, &V)> {
        self.iter().take(self.size).collect()
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}
