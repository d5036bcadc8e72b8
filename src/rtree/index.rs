//! The auxiliary `indexKey` record (spec.md §3, §4.3) and its invariant
//! check.

use core::ptr::NonNull;

use super::node::RNode;

/// A record in `indexKey`: a back-pointer to the leaf currently holding
/// the value for some primary key.
///
/// spec.md describes this as `{value, leaf}`. This crate stores only the
/// leaf pointer — the value itself is re-found inside that leaf via the
/// `toKey` projection (see `RTree::get`/`remove`), which avoids forcing a
/// `Clone` or `PartialEq` bound onto `V` purely to keep a duplicate handle
/// around.
pub(crate) struct IndexRef<V, B> {
    pub(crate) leaf: NonNull<RNode<V, B>>,
}

impl<V, B> Clone for IndexRef<V, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V, B> Copy for IndexRef<V, B> {}

// SAFETY: `leaf` points into the same owned node tree as every other raw
// pointer in this crate; see `rtree::node::RNode`'s Send/Sync note.
unsafe impl<V: Send, B: Send> Send for IndexRef<V, B> {}
unsafe impl<V: Sync, B: Sync> Sync for IndexRef<V, B> {}
