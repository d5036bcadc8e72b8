//! Descent and point lookup (spec.md §4.2 "Search").

use super::node::Node;
use super::BPlusTree;

impl<K: Ord, V, const INCLUSIVE_END: bool> BPlusTree<K, V, INCLUSIVE_END> {
    /// Descend from the root to the leaf that would hold `key`.
    pub(crate) fn leaf_for_key(&self, key: &K) -> Option<&Node<K, V>> {
        let mut cur = self.root.as_deref()?;
        loop {
            match cur {
                Node::Leaf(_) => return Some(cur),
                Node::Internal(b) => {
                    let idx = b.child_index(key);
                    cur = &b.children[idx];
                }
            }
        }
    }

    pub(crate) fn leaf_for_key_mut(&mut self, key: &K) -> Option<&mut Node<K, V>> {
        let mut cur = self.root.as_deref_mut()?;
        loop {
            match cur {
                Node::Leaf(_) => return Some(cur),
                Node::Internal(b) => {
                    let idx = b.child_index(key);
                    cur = &mut b.children[idx];
                }
            }
        }
    }

    /// Point lookup. `O(height)` descent plus one binary search per level.
    pub fn get(&self, key: &K) -> Option<&V> {
        let leaf = self.leaf_for_key(key)?.as_leaf();
        let idx = leaf.search(key).ok()?;
        Some(&leaf.values[idx])
    }

    /// Mutable point lookup.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let leaf = self.leaf_for_key_mut(key)?.as_leaf_mut();
        let idx = leaf.search(key).ok()?;
        Some(&mut leaf.values[idx])
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }
}
