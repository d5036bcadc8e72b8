//! The user-implemented bounding-box contract (spec.md §6).

/// Result of [`RBox::intersect`]: does `self` cover or touch `other`?
/// The test is asymmetric — `query.intersect(&stored)` asks "does the
/// query box cover/touch the stored box", not the reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intersection {
    /// `self` fully covers `other`.
    Contains,
    /// `self` and `other` overlap but `self` does not fully cover `other`.
    Intersects,
    NoCollision,
}

/// A user-supplied bounding box. Implementations back the R-tree's
/// internal and leaf slots.
///
/// # The `union` direction
///
/// `union(&self, other)` mutates **`other`**, not `self`, to become the
/// covering union of the two boxes. This is the one genuinely
/// counter-intuitive part of the contract (spec.md §9): a leaf's
/// `get_box()` clones slot 0 into an accumulator and then folds every
/// other slot's `union(&mut acc)` into it, so the accumulator — not the
/// slot being unioned — is always the one passed as `other`. Getting this
/// backwards silently drops box coverage rather than panicking, so it is
/// worth re-reading before implementing.
pub trait RBox: Clone {
    /// Total order used by the R-tree's split heuristic.
    fn compare(&self, other: &Self) -> core::cmp::Ordering;

    /// Expand `other` in place to cover both `self` and the original
    /// `other`. Does not modify `self`.
    fn union(&self, other: &mut Self);

    /// Does `self` cover (`Contains`), touch (`Intersects`), or miss
    /// (`NoCollision`) `other`?
    fn intersect(&self, other: &Self) -> Intersection;
}
