//! Ordered insert with split (spec.md §4.2 "Insert").

use alloc::boxed::Box;
use core::ptr::NonNull;

use crate::error::BPlusTreeError;
use crate::BTreeResult;

use super::node::{InternalNode, LeafNode, Node};
use super::BPlusTree;

pub(crate) enum InsertOutcome<K, V> {
    Done(Option<V>),
    Split {
        sep_key: K,
        right: Box<Node<K, V>>,
        old: Option<V>,
    },
}

impl<K: Ord + Clone, V, const INCLUSIVE_END: bool> BPlusTree<K, V, INCLUSIVE_END> {
    /// Insert `key -> value`, returning the displaced value if any.
    ///
    /// `put(_, null)` has no analogue in safe Rust (there is no null
    /// value); callers that modeled an optional value should use
    /// `Option<V>` as `V` instead. `computeIfAbsent`'s null-supplier rule
    /// is enforced in [`Self::compute_if_absent`].
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if self.root.is_none() {
            self.root = Some(Box::new(Node::new_leaf()));
            self.level0 = Some(NonNull::from(self.root.as_deref().unwrap()));
        }
        let root = self.root.as_deref_mut().unwrap();
        match Self::insert_rec(root, self.order, key, value) {
            InsertOutcome::Done(old) => {
                if old.is_none() {
                    self.size += 1;
                }
                old
            }
            InsertOutcome::Split {
                sep_key,
                right,
                old,
            } => {
                let old_root = self.root.take().unwrap();
                let left_key = old_root.min_key().clone();
                let new_root = InternalNode {
                    keys: alloc::vec![left_key, sep_key],
                    children: alloc::vec![old_root, right],
                };
                self.root = Some(Box::new(Node::Internal(new_root)));
                self.height += 1;
                if old.is_none() {
                    self.size += 1;
                }
                old
            }
        }
    }

    /// `put` if absent; otherwise return the existing value without
    /// invoking `f`. `f` is `Option`-wrapped to model spec.md's "null
    /// supplier" caller fault explicitly; a supplier returning `None` is
    /// the "null-returning supplier" fault.
    pub fn compute_if_absent<F>(&mut self, key: K, f: Option<F>) -> BTreeResult<&V>
    where
        F: FnOnce() -> Option<V>,
    {
        if self.get(&key).is_none() {
            let supplier = f.ok_or_else(|| {
                BPlusTreeError::NullValue("computeIfAbsent supplier was null".into())
            })?;
            let value = supplier().ok_or_else(|| {
                BPlusTreeError::NullValue("computeIfAbsent supplier returned null".into())
            })?;
            self.put(key.clone(), value);
        }
        Ok(self.get(&key).expect("just inserted or already present"))
    }

    fn insert_rec(node: &mut Node<K, V>, order: usize, key: K, value: V) -> InsertOutcome<K, V> {
        match node {
            Node::Leaf(leaf) => Self::leaf_insert(leaf, order, key, value),
            Node::Internal(internal) => {
                let idx = internal.child_index(&key);
                let outcome = Self::insert_rec(&mut internal.children[idx], order, key, value);
                match outcome {
                    InsertOutcome::Done(old) => {
                        internal.refresh_key(idx);
                        InsertOutcome::Done(old)
                    }
                    InsertOutcome::Split {
                        sep_key,
                        right,
                        old,
                    } => {
                        internal.refresh_key(idx);
                        internal.insert_at(idx + 1, sep_key, right);
                        if internal.children.len() <= order {
                            InsertOutcome::Done(old)
                        } else {
                            Self::split_internal(internal, order, old)
                        }
                    }
                }
            }
        }
    }

    fn leaf_insert(leaf: &mut LeafNode<K, V>, order: usize, key: K, value: V) -> InsertOutcome<K, V> {
        match leaf.search(&key) {
            Ok(i) => {
                let old = core::mem::replace(&mut leaf.values[i], value);
                InsertOutcome::Done(Some(old))
            }
            Err(i) => {
                if i == leaf.keys.len() {
                    leaf.append(key, value);
                } else {
                    leaf.insert_at(i, key, value);
                }
                if leaf.keys.len() <= order {
                    InsertOutcome::Done(None)
                } else {
                    Self::split_leaf(leaf, order)
                }
            }
        }
    }

    fn split_leaf(leaf: &mut LeafNode<K, V>, order: usize) -> InsertOutcome<K, V> {
        let pivot = (order + 1) / 2;
        let right_keys = leaf.keys.split_off(pivot);
        let right_values = leaf.values.split_off(pivot);
        let sep_key = right_keys[0].clone();
        let mut right_box = Box::new(Node::Leaf(LeafNode {
            keys: right_keys,
            values: right_values,
            next: leaf.next.take(),
        }));
        let right_ptr = NonNull::from(right_box.as_mut());
        leaf.next = Some(right_ptr);
        InsertOutcome::Split {
            sep_key,
            right: right_box,
            old: None,
        }
    }

    fn split_internal(
        internal: &mut InternalNode<K, V>,
        order: usize,
        old: Option<V>,
    ) -> InsertOutcome<K, V> {
        let pivot = (order + 1) / 2;
        let right = InternalNode {
            keys: internal.keys.split_off(pivot),
            children: internal.children.split_off(pivot),
        };
        let sep_key = right.keys[0].clone();
        InsertOutcome::Split {
            sep_key,
            right: Box::new(Node::Internal(right)),
            old,
        }
    }
}
