//! Remove with bottom-up merge/redistribute (spec.md §4.3 "Remove").
//!
//! Unlike the linear tree, removal starts from the leaf the auxiliary
//! `indexKey` points at directly — there is no descent to carry ancestors
//! on the call stack — so this walks back up via each node's `parent`
//! pointer instead.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::ptr::NonNull;

use crate::algebra;
use crate::rbox::RBox;

use super::index::IndexRef;
use super::node::{RInternal, RNode};
use super::RTree;

impl<K, V, B, ToKey, ToBox> RTree<K, V, B, ToKey, ToBox>
where
    K: Ord + Clone,
    B: RBox,
    ToKey: Fn(&V) -> K,
    ToBox: Fn(&V) -> B,
{
    /// Remove the value stored under `key`, returning it if present. A
    /// miss is a no-op returning `None`.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let index_ref = self.index_key.remove(key)?;
        let order = self.order;
        let to_key = &self.to_key;

        // SAFETY: `index_ref.leaf` was recorded by this tree and, since we
        // have not yet removed it from the node tree, is still live.
        let leaf_parent = unsafe { index_ref.leaf.as_ref() }.parent();
        let value = {
            let mut leaf_ptr = index_ref.leaf;
            // SAFETY: see above.
            let leaf = unsafe { leaf_ptr.as_mut() }.as_leaf_mut();
            let pos = leaf
                .values
                .iter()
                .position(|v| to_key(v) == *key)
                .expect("indexKey pointed at a leaf that does not hold its value");
            algebra::delete_at(&mut leaf.boxes, pos);
            algebra::delete_at(&mut leaf.values, pos)
        };
        self.size -= 1;

        // Walk from the leaf's parent up to the root, one level at a time.
        // `rebalance_children` can merge the node `ptr` itself points at
        // into a sibling at the *next* iteration (when its parent is
        // processed), freeing that `Box<RNode<_>>` — so the box refresh for
        // a level must happen immediately, while `ptr` is still known-live,
        // never from a pointer captured before the walk started. This is
        // spec.md §4.3's "after every level's modifications, refresh this
        // node's slot boxes; then recurse to its parent", applied literally
        // rather than deferred to a single pass after the fact.
        let mut cur = leaf_parent;
        while let Some(mut ptr) = cur {
            // SAFETY: `ptr` is a parent pointer reachable from the tree
            // rooted at `self.root`, read fresh from the previous, still
            // live iteration's node (or from `leaf_parent` on the first
            // iteration, before any merge has had a chance to run).
            let internal = unsafe { ptr.as_mut() }.as_internal_mut();
            Self::rebalance_children(internal, order, to_key, &mut self.index_key);
            internal.update_boxes();
            cur = unsafe { ptr.as_ref() }.parent();
        }

        self.collapse_root();
        Some(value)
    }

    /// Derive the key via `to_box`'s sibling projection, `to_key`, and
    /// remove by it.
    pub fn remove_by_value(&mut self, value: &V) -> Option<V> {
        let key = (self.to_key)(value);
        self.remove(&key)
    }

    /// Scan every adjacent child pair once, from right to left: merge
    /// when the joint count fits in one node (`<= order`, looser than the
    /// linear tree's strict `< order`, per spec.md §3's "does not enforce
    /// `ceil(order/2)` strictly"), else redistribute when the left falls
    /// below `order/2`.
    fn rebalance_children(
        internal: &mut RInternal<V, B>,
        order: usize,
        to_key: &ToKey,
        index_key: &mut crate::btree::TreeMap<K, IndexRef<V, B>>,
    ) {
        if internal.children.len() < 2 {
            return;
        }
        let mut i = internal.children.len() - 2;
        loop {
            let left_count = internal.children[i].count();
            let right_count = internal.children[i + 1].count();
            if left_count + right_count <= order {
                let right_child = internal.children.remove(i + 1);
                internal.boxes.remove(i + 1);
                Self::merge_into(&mut internal.children[i], right_child, to_key, index_key);
            } else if left_count < order / 2 {
                let target = order / 2;
                let (left_part, right_part) = internal.children.split_at_mut(i + 1);
                let left = left_part.last_mut().unwrap();
                let right = &mut right_part[0];
                while left.count() < target {
                    Self::move_front_to_back(left, right, to_key, index_key);
                }
            }
            if i == 0 {
                break;
            }
            i -= 1;
        }
    }

    /// Merge `right`'s slots onto the tail of `left`. For leaves, refresh
    /// `indexKey` for every relocated value; for internal nodes, refresh
    /// the `parent` pointer of every relocated child.
    fn merge_into(
        left: &mut Box<RNode<V, B>>,
        mut right: Box<RNode<V, B>>,
        to_key: &ToKey,
        index_key: &mut crate::btree::TreeMap<K, IndexRef<V, B>>,
    ) {
        let left_ptr = NonNull::from(left.as_mut());
        if left.is_leaf() {
            let right_leaf = right.as_leaf_mut();
            let moved_boxes: Vec<B> = core::mem::take(&mut right_leaf.boxes);
            let moved_values: Vec<V> = core::mem::take(&mut right_leaf.values);
            let left_leaf = left.as_leaf_mut();
            for (b, v) in moved_boxes.into_iter().zip(moved_values.into_iter()) {
                let k = to_key(&v);
                left_leaf.boxes.push(b);
                left_leaf.values.push(v);
                index_key.put(k, IndexRef { leaf: left_ptr });
            }
        } else {
            let right_internal = right.as_internal_mut();
            let moved_boxes: Vec<B> = core::mem::take(&mut right_internal.boxes);
            let moved_children: Vec<Box<RNode<V, B>>> = core::mem::take(&mut right_internal.children);
            let left_internal = left.as_internal_mut();
            for (b, mut c) in moved_boxes.into_iter().zip(moved_children.into_iter()) {
                c.set_parent(Some(left_ptr));
                left_internal.boxes.push(b);
                left_internal.children.push(c);
            }
        }
    }

    /// Move one slot from the front of `right` to the back of `left`.
    fn move_front_to_back(
        left: &mut Box<RNode<V, B>>,
        right: &mut Box<RNode<V, B>>,
        to_key: &ToKey,
        index_key: &mut crate::btree::TreeMap<K, IndexRef<V, B>>,
    ) {
        let left_ptr = NonNull::from(left.as_mut());
        if left.is_leaf() {
            let rl = right.as_leaf_mut();
            let b = rl.boxes.remove(0);
            let v = rl.values.remove(0);
            let k = to_key(&v);
            let ll = left.as_leaf_mut();
            ll.boxes.push(b);
            ll.values.push(v);
            index_key.put(k, IndexRef { leaf: left_ptr });
        } else {
            let ri = right.as_internal_mut();
            let b = ri.boxes.remove(0);
            let mut c = ri.children.remove(0);
            c.set_parent(Some(left_ptr));
            let li = left.as_internal_mut();
            li.boxes.push(b);
            li.children.push(c);
        }
    }

    /// While the root is internal with a single child, replace it with
    /// that child and shrink the recorded height.
    fn collapse_root(&mut self) {
        loop {
            let should_collapse =
                matches!(self.root.as_deref(), Some(n) if !n.is_leaf() && n.count() == 1);
            if !should_collapse {
                break;
            }
            let mut old_root = self.root.take().unwrap();
            let mut only_child = old_root.as_internal_mut().children.pop().unwrap();
            only_child.set_parent(None);
            self.root = Some(only_child);
            self.height -= 1;
        }
    }
}
