//! Intersection traversal and whole-tree scan (spec.md §4.3 "Intersection
//! search"), plus the optional `Executor`-backed parallel variants
//! (SPEC_FULL.md §2.5).

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::executor::{Executor, Task};
use crate::rbox::{Intersection, RBox};

use super::node::RNode;
use super::RTree;

impl<K, V, B, ToKey, ToBox> RTree<K, V, B, ToKey, ToBox>
where
    K: Ord + Clone,
    B: RBox,
    ToKey: Fn(&V) -> K,
    ToBox: Fn(&V) -> B,
{
    /// Emit every value whose box `query_box` contains or touches, per
    /// spec.md's asymmetric `queryBox.intersect(slotBox)` test.
    pub fn intersect(&self, query_box: &B, sink: &mut dyn FnMut(&V)) {
        if let Some(root) = &self.root {
            Self::intersect_node(root, query_box, sink);
        }
    }

    /// Emit every value in the tree, in no particular order.
    pub fn get_all(&self, sink: &mut dyn FnMut(&V)) {
        if let Some(root) = &self.root {
            Self::search_all_node(root, sink);
        }
    }

    fn intersect_node(node: &RNode<V, B>, query_box: &B, sink: &mut dyn FnMut(&V)) {
        match node {
            RNode::Leaf(leaf) => {
                for (b, v) in leaf.boxes.iter().zip(leaf.values.iter()) {
                    match query_box.intersect(b) {
                        Intersection::Contains | Intersection::Intersects => sink(v),
                        Intersection::NoCollision => {}
                    }
                }
            }
            RNode::Internal(internal) => {
                for (b, child) in internal.boxes.iter().zip(internal.children.iter()) {
                    match query_box.intersect(b) {
                        Intersection::Contains => Self::search_all_node(child, sink),
                        Intersection::Intersects => Self::intersect_node(child, query_box, sink),
                        Intersection::NoCollision => {}
                    }
                }
            }
        }
    }

    fn search_all_node(node: &RNode<V, B>, sink: &mut dyn FnMut(&V)) {
        match node {
            RNode::Leaf(leaf) => {
                for v in &leaf.values {
                    sink(v);
                }
            }
            RNode::Internal(internal) => {
                for child in &internal.children {
                    Self::search_all_node(child, sink);
                }
            }
        }
    }

    /// Parallel `intersect`: fans one task out per direct child of the
    /// root onto `executor`, then recurses sequentially within each task.
    /// `sink` must be safe to invoke concurrently, per spec.md §5.
    pub fn intersect_parallel(&self, query_box: &B, sink: &(dyn Fn(&V) + Sync), executor: &dyn Executor)
    where
        V: Sync,
        B: Sync,
    {
        let Some(root) = &self.root else { return };
        match root.as_ref() {
            RNode::Leaf(_) => Self::intersect_node(root, query_box, &mut |v| sink(v)),
            RNode::Internal(internal) => {
                let tasks: Vec<Task<'_>> = internal
                    .boxes
                    .iter()
                    .zip(internal.children.iter())
                    .filter_map(|(b, child)| match query_box.intersect(b) {
                        Intersection::NoCollision => None,
                        Intersection::Contains => {
                            let task: Task<'_> =
                                Box::new(move || Self::search_all_node(child, &mut |v| sink(v)));
                            Some(task)
                        }
                        Intersection::Intersects => {
                            let task: Task<'_> =
                                Box::new(move || Self::intersect_node(child, query_box, &mut |v| sink(v)));
                            Some(task)
                        }
                    })
                    .collect();
                executor.join_all(tasks);
            }
        }
    }

    /// Parallel `get_all`: fans one task out per direct child of the root.
    pub fn get_all_parallel(&self, sink: &(dyn Fn(&V) + Sync), executor: &dyn Executor)
    where
        V: Sync,
        B: Sync,
    {
        let Some(root) = &self.root else { return };
        match root.as_ref() {
            RNode::Leaf(_) => Self::search_all_node(root, &mut |v| sink(v)),
            RNode::Internal(internal) => {
                let tasks: Vec<Task<'_>> = internal
                    .children
                    .iter()
                    .map(|child| -> Task<'_> { Box::new(move || Self::search_all_node(child, &mut |v| sink(v))) })
                    .collect();
                executor.join_all(tasks);
            }
        }
    }
}
