//! Node shape for the R-tree (spec.md §4.3). Unlike the linear tree,
//! every node here — leaf and internal alike — carries a raw, non-owning
//! back-reference to its parent: `remove()` reaches a leaf directly
//! through the auxiliary `indexKey` lookup rather than by re-descending
//! from the root, so it needs a way to walk back up without having the
//! path already on the call stack (spec.md §9 "Cyclic ownership").

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::ptr::NonNull;

use crate::rbox::RBox;

pub(crate) enum RNode<V, B> {
    Leaf(RLeaf<V, B>),
    Internal(RInternal<V, B>),
}

pub(crate) struct RLeaf<V, B> {
    pub(crate) boxes: Vec<B>,
    pub(crate) values: Vec<V>,
    pub(crate) parent: Option<NonNull<RNode<V, B>>>,
}

pub(crate) struct RInternal<V, B> {
    pub(crate) boxes: Vec<B>,
    pub(crate) children: Vec<Box<RNode<V, B>>>,
    pub(crate) parent: Option<NonNull<RNode<V, B>>>,
}

// SAFETY: same argument as `btree::node::Node`'s impls — the raw
// `parent` pointers never alias a live `&mut` borrow from outside the
// structural Box-ownership chain, and `RTree` is only ever shared across
// threads by crates that add their own synchronization on top.
unsafe impl<V: Send, B: Send> Send for RNode<V, B> {}
unsafe impl<V: Sync, B: Sync> Sync for RNode<V, B> {}

impl<V, B> RNode<V, B> {
    pub(crate) fn new_leaf() -> Self {
        RNode::Leaf(RLeaf {
            boxes: Vec::new(),
            values: Vec::new(),
            parent: None,
        })
    }

    pub(crate) fn new_internal() -> Self {
        RNode::Internal(RInternal {
            boxes: Vec::new(),
            children: Vec::new(),
            parent: None,
        })
    }

    #[inline]
    pub(crate) fn count(&self) -> usize {
        match self {
            RNode::Leaf(l) => l.values.len(),
            RNode::Internal(b) => b.children.len(),
        }
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        matches!(self, RNode::Leaf(_))
    }

    #[inline]
    pub(crate) fn boxes(&self) -> &[B] {
        match self {
            RNode::Leaf(l) => &l.boxes,
            RNode::Internal(b) => &b.boxes,
        }
    }

    #[inline]
    pub(crate) fn parent(&self) -> Option<NonNull<RNode<V, B>>> {
        match self {
            RNode::Leaf(l) => l.parent,
            RNode::Internal(b) => b.parent,
        }
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, parent: Option<NonNull<RNode<V, B>>>) {
        match self {
            RNode::Leaf(l) => l.parent = parent,
            RNode::Internal(b) => b.parent = parent,
        }
    }

    #[inline]
    pub(crate) fn as_leaf(&self) -> &RLeaf<V, B> {
        match self {
            RNode::Leaf(l) => l,
            RNode::Internal(_) => unreachable!("expected R-tree leaf"),
        }
    }

    #[inline]
    pub(crate) fn as_leaf_mut(&mut self) -> &mut RLeaf<V, B> {
        match self {
            RNode::Leaf(l) => l,
            RNode::Internal(_) => unreachable!("expected R-tree leaf"),
        }
    }

    #[inline]
    pub(crate) fn as_internal(&self) -> &RInternal<V, B> {
        match self {
            RNode::Internal(b) => b,
            RNode::Leaf(_) => unreachable!("expected R-tree internal node"),
        }
    }

    #[inline]
    pub(crate) fn as_internal_mut(&mut self) -> &mut RInternal<V, B> {
        match self {
            RNode::Internal(b) => b,
            RNode::Leaf(_) => unreachable!("expected R-tree internal node"),
        }
    }
}

impl<V, B: RBox> RNode<V, B> {
    /// The covering union of every slot box in this node — a fresh
    /// clone, not a reference, per spec.md §4.1's `getBox()` contract.
    pub(crate) fn get_box(&self) -> B {
        let boxes = self.boxes();
        let mut acc = boxes[0].clone();
        for b in &boxes[1..] {
            b.union(&mut acc);
        }
        acc
    }
}

impl<V, B: RBox> RInternal<V, B> {
    /// Rewrite each slot's box from the matching child's current union.
    pub(crate) fn update_boxes(&mut self) {
        for i in 0..self.children.len() {
            self.boxes[i] = self.children[i].get_box();
        }
    }
}
