//! Node shape for the linear B+-tree: a tagged leaf/internal variant sharing
//! one node algebra (spec.md §4.1). Ownership of the tree is structural —
//! a parent's `children: Vec<Box<Node<K, V>>>` owns its subtrees — while the
//! leaf forward chain is a non-owning raw pointer, per spec.md §9's
//! "cyclic ownership" note: the linear tree needs no parent pointer because
//! every mutation path is walked recursively and carries its ancestors on
//! the call stack, but the leaf chain itself is a genuine cross-subtree
//! reference that cannot be expressed as a second owner.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::ptr::NonNull;

use crate::algebra;

pub(crate) enum Node<K, V> {
    Leaf(LeafNode<K, V>),
    Internal(InternalNode<K, V>),
}

pub(crate) struct LeafNode<K, V> {
    pub(crate) keys: Vec<K>,
    pub(crate) values: Vec<V>,
    /// Forward link to the next leaf in key order. `None` for the
    /// rightmost leaf. Non-owning: the pointee is owned by whichever
    /// internal node holds it as a child.
    pub(crate) next: Option<NonNull<Node<K, V>>>,
}

pub(crate) struct InternalNode<K, V> {
    /// `keys[i]` equals the minimum key of `children[i]`'s subtree.
    pub(crate) keys: Vec<K>,
    pub(crate) children: Vec<Box<Node<K, V>>>,
}

// SAFETY: the only raw pointer in this module is `LeafNode::next`, which
// never aliases a `&mut` access to its pointee from two places at once —
// traversal only ever dereferences it to read a sibling leaf that is, at
// the same time, reachable and exclusively owned through the tree's Box
// chain from the root. The wrapper in `concurrent.rs` serializes all
// access via a single `RwLock`, so no data race can occur through this
// pointer as long as `K`/`V` are themselves safe to share across threads.
unsafe impl<K: Send, V: Send> Send for Node<K, V> {}
unsafe impl<K: Sync, V: Sync> Sync for Node<K, V> {}

impl<K, V> Node<K, V> {
    pub(crate) fn new_leaf() -> Self {
        Node::Leaf(LeafNode {
            keys: Vec::new(),
            values: Vec::new(),
            next: None,
        })
    }

    pub(crate) fn new_internal() -> Self {
        Node::Internal(InternalNode {
            keys: Vec::new(),
            children: Vec::new(),
        })
    }

    #[inline]
    pub(crate) fn count(&self) -> usize {
        match self {
            Node::Leaf(l) => l.keys.len(),
            Node::Internal(b) => b.children.len(),
        }
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    #[inline]
    pub(crate) fn as_leaf(&self) -> &LeafNode<K, V> {
        match self {
            Node::Leaf(l) => l,
            Node::Internal(_) => unreachable!("expected leaf node"),
        }
    }

    #[inline]
    pub(crate) fn as_leaf_mut(&mut self) -> &mut LeafNode<K, V> {
        match self {
            Node::Leaf(l) => l,
            Node::Internal(_) => unreachable!("expected leaf node"),
        }
    }

    #[inline]
    pub(crate) fn as_internal(&self) -> &InternalNode<K, V> {
        match self {
            Node::Internal(b) => b,
            Node::Leaf(_) => unreachable!("expected internal node"),
        }
    }

    #[inline]
    pub(crate) fn as_internal_mut(&mut self) -> &mut InternalNode<K, V> {
        match self {
            Node::Internal(b) => b,
            Node::Leaf(_) => unreachable!("expected internal node"),
        }
    }

    /// The minimum key in this node's subtree (its own slot 0 key, or the
    /// first child's, recursively).
    pub(crate) fn min_key(&self) -> &K {
        match self {
            Node::Leaf(l) => &l.keys[0],
            Node::Internal(b) => &b.keys[0],
        }
    }
}

impl<K: Ord, V> LeafNode<K, V> {
    /// Binary search this leaf's keys; `Ok(i)` on exact match, `Err(i)` on
    /// the insertion point.
    pub(crate) fn search(&self, key: &K) -> Result<usize, usize> {
        algebra::binary_search_by(&self.keys, |k| k.cmp(key))
    }

    pub(crate) fn insert_at(&mut self, i: usize, key: K, value: V) {
        algebra::insert_at(&mut self.keys, i, key);
        algebra::insert_at(&mut self.values, i, value);
    }

    pub(crate) fn append(&mut self, key: K, value: V) {
        algebra::append(&mut self.keys, key);
        algebra::append(&mut self.values, value);
    }

    pub(crate) fn delete_at(&mut self, i: usize) -> (K, V) {
        let k = algebra::delete_at(&mut self.keys, i);
        let v = algebra::delete_at(&mut self.values, i);
        (k, v)
    }

    /// Merge `other`'s slots onto the tail of `self`, leaving `other`
    /// empty and splicing `self.next` to skip over it.
    pub(crate) fn merge_right(&mut self, other: &mut LeafNode<K, V>) {
        algebra::merge_into(&mut self.keys, &mut other.keys);
        algebra::merge_into(&mut self.values, &mut other.values);
        self.next = other.next.take();
    }
}

impl<K: Ord, V> InternalNode<K, V> {
    /// Map a query key to the index of the child whose subtree covers it,
    /// per spec.md §4.2's search rule: binary-search, clamp the miss to
    /// `[0, count-1]`, then step one slot left if that slot's key strictly
    /// exceeds the query.
    pub(crate) fn child_index(&self, key: &K) -> usize {
        let mut idx = match algebra::binary_search_by(&self.keys, |k| k.cmp(key)) {
            Ok(i) => i,
            Err(i) => i,
        };
        if idx >= self.keys.len() {
            idx = self.keys.len() - 1;
        }
        if self.keys[idx] > *key && idx > 0 {
            idx -= 1;
        }
        idx
    }

    pub(crate) fn insert_at(&mut self, i: usize, key: K, child: Box<Node<K, V>>) {
        algebra::insert_at(&mut self.keys, i, key);
        algebra::insert_at(&mut self.children, i, child);
    }

    pub(crate) fn append(&mut self, key: K, child: Box<Node<K, V>>) {
        algebra::append(&mut self.keys, key);
        algebra::append(&mut self.children, child);
    }

    pub(crate) fn delete_at(&mut self, i: usize) -> Box<Node<K, V>> {
        algebra::delete_at(&mut self.keys, i);
        algebra::delete_at(&mut self.children, i)
    }

    pub(crate) fn merge_right(&mut self, other: &mut InternalNode<K, V>) {
        algebra::merge_into(&mut self.keys, &mut other.keys);
        algebra::merge_into(&mut self.children, &mut other.children);
    }

    /// Refresh slot `i`'s key to match its child's current minimum.
    pub(crate) fn refresh_key(&mut self, i: usize)
    where
        K: Clone,
    {
        self.keys[i] = self.children[i].min_key().clone();
    }
}
