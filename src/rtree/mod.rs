//! The R-tree (spec.md §4.3): a spatial variant of the same node algebra,
//! with a generic value type and user-supplied `toKey`/`toBox`
//! projections, plus an auxiliary [`TreeMap`] mapping primary keys to the
//! leaf currently holding each value.

mod index;
mod insert;
mod node;
mod remove;
mod search;

use alloc::boxed::Box;

use crate::btree::TreeMap;
use crate::error::BPlusTreeError;
use crate::{BTreeResult, MIN_ORDER};
use index::IndexRef;
use node::RNode;

/// Spatial index over values of type `V`, keyed by `K` via `to_key` and
/// bounded by `B` via `to_box`.
///
/// `B` carries the user-implemented [`crate::RBox`] contract. `ToKey` and
/// `ToBox` are the projections spec.md §3 calls `toKey(value)` and
/// `toBox(value)`, supplied once at construction.
pub struct RTree<K, V, B, ToKey, ToBox> {
    root: Option<Box<RNode<V, B>>>,
    height: usize,
    size: usize,
    order: usize,
    index_key: TreeMap<K, IndexRef<V, B>>,
    to_key: ToKey,
    to_box: ToBox,
}

impl<K, V, B, ToKey, ToBox> RTree<K, V, B, ToKey, ToBox>
where
    K: Ord + Clone,
    ToKey: Fn(&V) -> K,
    ToBox: Fn(&V) -> B,
{
    /// Construct an empty R-tree with the given branching factor and
    /// key/box projections.
    pub fn with_order(order: usize, to_key: ToKey, to_box: ToBox) -> BTreeResult<Self> {
        if order < MIN_ORDER {
            return Err(BPlusTreeError::InvalidCapacity(alloc::format!(
                "order must be >= {MIN_ORDER}, got {order}"
            )));
        }
        Ok(Self {
            root: None,
            height: 0,
            size: 0,
            order,
            index_key: TreeMap::with_order(order).expect("order already validated above"),
            to_key,
            to_box,
        })
    }

    /// Construct with [`crate::DEFAULT_ORDER`].
    pub fn new(to_key: ToKey, to_box: ToBox) -> Self {
        Self::with_order(crate::DEFAULT_ORDER, to_key, to_box)
            .expect("DEFAULT_ORDER >= MIN_ORDER")
    }

    pub fn order(&self) -> usize {
        self.order
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

    pub fn contains_key(&self, key: &K) -> bool {
        self.index_key.contains_key(key)
    }

    /// Point lookup via the auxiliary primary-key index.
    pub fn get(&self, key: &K) -> Option<&V> {
        let index_ref = self.index_key.get(key)?;
        // SAFETY: `index_ref.leaf` was recorded by this tree and stays
        // valid as long as `key` remains present in `index_key`, which
        // this shared borrow of `self` guarantees is not concurrently
        // mutated out from under us.
        let leaf = unsafe { index_ref.leaf.as_ref() }.as_leaf();
        let to_key = &self.to_key;
        leaf.values.iter().find(|v| to_key(v) == *key)
    }

    /// Remove every entry, resetting to an empty single-leaf root.
    pub fn clear(&mut self) {
        self.root = Some(Box::new(RNode::new_leaf()));
        self.height = 0;
        self.size = 0;
        self.index_key.clear();
    }

    /// Checks spec.md §3's R-tree invariant that every `indexKey` entry
    /// points at a leaf that still holds the corresponding value. An
    /// internal-consistency fault: panics rather than returning a
    /// `Result`, since a stale `IndexRef` means the engine itself is
    /// broken, not that the caller did anything wrong.
    pub fn validate_index(&self) {
        for (key, index_ref) in self.index_key.get_all() {
            // SAFETY: see `get`'s note.
            let leaf = unsafe { index_ref.leaf.as_ref() }.as_leaf();
            let found = leaf.values.iter().any(|v| (self.to_key)(v) == *key);
            if !found {
                panic!("indexKey entry points at a leaf that does not hold its value");
            }
        }
    }
}
