//! The generic linear B+-tree core (spec.md §4.2) and its two public
//! specializations.

mod delete;
mod get;
mod insert;
mod iterate;
mod node;

pub use iterate::RangeIter;

use alloc::boxed::Box;
use core::ptr::NonNull;

use crate::error::BPlusTreeError;
use crate::{BTreeResult, MIN_ORDER};
use node::Node;

/// Generic B+-tree core shared by [`LongTreeMap`] and [`TreeMap`].
///
/// `INCLUSIVE_END` selects the range-end semantics spec.md §9 documents as
/// diverging between the two key flavors: `true` admits keys `<= end`
/// (the `u64`-keyed variant), `false` admits keys `< end` (the generic
/// variant).
pub struct BPlusTree<K, V, const INCLUSIVE_END: bool> {
    root: Option<Box<Node<K, V>>>,
    /// Height of the root above the leaves; `0` means the root is a leaf.
    height: usize,
    size: usize,
    /// Entry point for whole-tree iteration and unbounded-start ranges.
    /// Non-owning: see `node::Node`'s safety note.
    level0: Option<NonNull<Node<K, V>>>,
    order: usize,
}

// SAFETY: see `node::Node`'s `Send`/`Sync` note; the only raw pointer
// owned at this level (`level0`) is subject to the identical argument.
unsafe impl<K: Send, V: Send, const E: bool> Send for BPlusTree<K, V, E> {}
unsafe impl<K: Sync, V: Sync, const E: bool> Sync for BPlusTree<K, V, E> {}

impl<K, V, const INCLUSIVE_END: bool> BPlusTree<K, V, INCLUSIVE_END> {
    /// Construct an empty tree with the given branching factor.
    pub fn with_order(order: usize) -> BTreeResult<Self> {
        if order < MIN_ORDER {
            return Err(BPlusTreeError::InvalidCapacity(alloc::format!(
                "order must be >= {MIN_ORDER}, got {order}"
            )));
        }
        Ok(Self {
            root: None,
            height: 0,
            size: 0,
            level0: None,
            order,
        })
    }

    /// Construct with [`crate::DEFAULT_ORDER`].
    pub fn new() -> Self {
        Self::with_order(crate::DEFAULT_ORDER).expect("DEFAULT_ORDER >= MIN_ORDER")
    }

    pub fn order(&self) -> usize {
        self.order
    }
}

impl<K, V, const INCLUSIVE_END: bool> Default for BPlusTree<K, V, INCLUSIVE_END> {
    fn default() -> Self {
        Self::new()
    }
}

/// B+-tree keyed by primitive `u64`, range-inclusive at the upper end.
pub type LongTreeMap<V> = BPlusTree<u64, V, true>;

/// B+-tree keyed by any totally ordered `K`, range-exclusive at the upper
/// end; `range(None, x)`/`range(x, None)` mean unbounded ends.
pub type TreeMap<K, V> = BPlusTree<K, V, false>;
