//! Delete with merge/redistribute (spec.md §4.2 "Delete").
//!
//! The teacher's own `delete.rs` ships as an unimplemented stub
//! (`// TODO: implement delete operation`); this module is the full
//! implementation of spec.md's algorithm.

use alloc::boxed::Box;

use super::node::{InternalNode, Node};
use super::BPlusTree;

impl<K: Ord + Clone, V, const INCLUSIVE_END: bool> BPlusTree<K, V, INCLUSIVE_END> {
    /// Remove `key`, returning its value if present. A miss is a no-op
    /// returning `None`.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let order = self.order;
        let removed = match self.root.as_deref_mut() {
            Some(root) => Self::delete_rec(root, order, key),
            None => None,
        };
        if removed.is_some() {
            self.size -= 1;
        }
        self.collapse_root();
        removed
    }

    fn delete_rec(node: &mut Node<K, V>, order: usize, key: &K) -> Option<V> {
        match node {
            Node::Leaf(leaf) => match leaf.search(key) {
                Ok(i) => Some(leaf.delete_at(i).1),
                Err(_) => None,
            },
            Node::Internal(internal) => {
                let idx = internal.child_index(key);
                let removed = Self::delete_rec(&mut internal.children[idx], order, key);
                if removed.is_some() {
                    Self::rebalance_children(internal, order);
                }
                removed
            }
        }
    }

    /// Scan every adjacent child pair once, from right to left, merging
    /// or redistributing where the node-count thresholds require it, then
    /// refresh every slot's min-key.
    fn rebalance_children(internal: &mut InternalNode<K, V>, order: usize) {
        if internal.children.len() >= 2 {
            let mut i = internal.children.len() - 2;
            loop {
                let left_count = internal.children[i].count();
                let right_count = internal.children[i + 1].count();
                if left_count + right_count < order {
                    let mut right_child = internal.children.remove(i + 1);
                    internal.keys.remove(i + 1);
                    Self::merge_nodes(&mut internal.children[i], &mut right_child);
                } else if left_count < order / 2 {
                    let target = order / 2;
                    let (left_part, right_part) = internal.children.split_at_mut(i + 1);
                    let left = left_part.last_mut().unwrap();
                    let right = &mut right_part[0];
                    while left.count() < target {
                        Self::move_front_to_back(left, right);
                    }
                }
                if i == 0 {
                    break;
                }
                i -= 1;
            }
        }
        for idx in 0..internal.children.len() {
            internal.refresh_key(idx);
        }
    }

    fn merge_nodes(left: &mut Node<K, V>, right: &mut Node<K, V>) {
        match (left, right) {
            (Node::Leaf(l), Node::Leaf(r)) => l.merge_right(r),
            (Node::Internal(l), Node::Internal(r)) => l.merge_right(r),
            _ => unreachable!("sibling nodes must share leaf/internal kind"),
        }
    }

    fn move_front_to_back(left: &mut Node<K, V>, right: &mut Node<K, V>) {
        match (left, right) {
            (Node::Leaf(l), Node::Leaf(r)) => {
                let k = r.keys.remove(0);
                let v = r.values.remove(0);
                l.append(k, v);
            }
            (Node::Internal(l), Node::Internal(r)) => {
                let k = r.keys.remove(0);
                let c = r.children.remove(0);
                l.append(k, c);
            }
            _ => unreachable!("sibling nodes must share leaf/internal kind"),
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
            let only_child = old_root.as_internal_mut().children.pop().unwrap();
            self.root = Some(only_child);
            self.height -= 1;
        }
    }

    /// Remove every entry, resetting to an empty single leaf.
    pub fn clear(&mut self) {
        self.root = Some(Box::new(Node::new_leaf()));
        self.level0 = Some(core::ptr::NonNull::from(self.root.as_deref().unwrap()));
        self.height = 0;
        self.size = 0;
    }
}
