use alloc::string::String;
use core::fmt;

/// Errors raised by the containers in this crate.
///
/// Caller faults (`InvalidCapacity`, `InvalidArgument`, `NullValue`,
/// `RangeOrder`) are returned before any mutation takes place. The
/// remaining variants signal an internal-consistency fault — a bug in the
/// engine rather than a bad call — and are only ever produced by the
/// `_validate*` debug assertions; callers should treat a tree that raised
/// one as poisoned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BPlusTreeError {
    /// `order` was below [`crate::MIN_ORDER`].
    InvalidCapacity(String),
    /// A supplied argument violates a precondition (e.g. `start > end`).
    InvalidArgument(String),
    /// `put`/`add` was called with a null value, or `computeIfAbsent`'s
    /// supplier was null or returned null.
    NullValue(String),
    /// `range(start, end)` was called with `start > end`.
    RangeOrder,
    /// Requested key is absent (only returned by the `*_item` accessors;
    /// the base accessors return `Option`/`None`).
    KeyNotFound,
    /// An internal invariant (`_validateIndex`, slot-count bounds, …) did
    /// not hold. Indicates engine corruption, not a caller mistake.
    DataIntegrityError(String),
    /// `deleteByIdentity` could not find the value it was asked to remove.
    CorruptedTree(String),
}

impl fmt::Display for BPlusTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BPlusTreeError::InvalidCapacity(s) => write!(f, "invalid capacity: {s}"),
            BPlusTreeError::InvalidArgument(s) => write!(f, "invalid argument: {s}"),
            BPlusTreeError::NullValue(s) => write!(f, "null value: {s}"),
            BPlusTreeError::RangeOrder => write!(f, "range start must be <= end"),
            BPlusTreeError::KeyNotFound => write!(f, "key not found"),
            BPlusTreeError::DataIntegrityError(s) => write!(f, "data integrity error: {s}"),
            BPlusTreeError::CorruptedTree(s) => write!(f, "corrupted tree: {s}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BPlusTreeError {}

#[cfg(not(feature = "std"))]
impl core::error::Error for BPlusTreeError {}
