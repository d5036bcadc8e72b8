//! In-memory balanced-tree indexes sharing one B+-tree node algebra.
//!
//! Four containers are exported:
//!
//! - [`LongTreeMap`] — B+-tree keyed by primitive `u64`, inclusive range end.
//! - [`TreeMap`] — B+-tree keyed by any `Ord` type, exclusive range end.
//! - [`ConcurrentTreeMap`] — reader/writer-locked wrapper over [`TreeMap`].
//! - [`RTree`] — spatial index generic over value, key and bounding box,
//!   built atop the same node algebra plus an auxiliary [`TreeMap`] index.
//!
//! The engine is not thread-safe on its own; only [`ConcurrentTreeMap`]
//! synchronizes. No persistence, transactions or MVCC are provided.
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod algebra;
mod error;
mod executor;
mod rbox;

pub mod btree;
pub mod rtree;

#[cfg(feature = "std")]
mod concurrent;

pub use btree::{BPlusTree, LongTreeMap, TreeMap};
pub use error::BPlusTreeError;
pub use executor::{Executor, SequentialExecutor};
pub use rbox::{Intersection, RBox};
pub use rtree::RTree;

#[cfg(feature = "std")]
pub use concurrent::ConcurrentTreeMap;

#[cfg(feature = "parallel")]
pub use executor::RayonExecutor;

/// Result alias used throughout the crate for caller-facing failures.
pub type BTreeResult<T> = Result<T, BPlusTreeError>;

/// Minimum branching factor accepted by every container's constructor.
pub const MIN_ORDER: usize = 3;

/// Default order used by the `new()` convenience constructors.
pub const DEFAULT_ORDER: usize = 8;
