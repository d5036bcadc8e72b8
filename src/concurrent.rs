//! Reader/writer-locked wrapper over [`TreeMap`] (spec.md §4.4).
//!
//! `get`/`get_all` hold a read lock for their full duration; `put`/
//! `compute_if_absent`/`remove`/`clear` hold a write lock. `range` returns
//! an iterator that re-acquires the read lock once per step and does not
//! hold it between calls — concurrent writers can interleave with
//! iteration, so a value present for the whole scan is emitted exactly
//! once, but a value inserted or removed mid-scan may be emitted or
//! skipped (spec.md §5's documented weak consistency).

use std::sync::{Arc, RwLock};

use crate::btree::TreeMap;
use crate::error::BPlusTreeError;
use crate::BTreeResult;

pub struct ConcurrentTreeMap<K, V> {
    inner: Arc<RwLock<TreeMap<K, V>>>,
}

impl<K, V> Clone for ConcurrentTreeMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K: Ord + Clone, V> ConcurrentTreeMap<K, V> {
    pub fn with_order(order: usize) -> BTreeResult<Self> {
        Ok(Self {
            inner: Arc::new(RwLock::new(TreeMap::with_order(order)?)),
        })
    }

    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(TreeMap::new())),
        }
    }

    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.read().expect("lock poisoned").get(key).cloned()
    }

    pub fn put(&self, key: K, value: V) -> Option<V> {
        self.inner.write().expect("lock poisoned").put(key, value)
    }

    pub fn compute_if_absent<F>(&self, key: K, f: Option<F>) -> BTreeResult<V>
    where
        F: FnOnce() -> Option<V>,
        V: Clone,
    {
        self.inner
            .write()
            .expect("lock poisoned")
            .compute_if_absent(key, f)
            .map(|v| v.clone())
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.write().expect("lock poisoned").remove(key)
    }

    pub fn clear(&self) {
        self.inner.write().expect("lock poisoned").clear();
    }

    pub fn size(&self) -> usize {
        self.inner.read().expect("lock poisoned").size()
    }

    pub fn height(&self) -> usize {
        self.inner.read().expect("lock poisoned").height()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().expect("lock poisoned").is_empty()
    }

    pub fn get_all(&self) -> Vec<(K, V)>
    where
        V: Clone,
    {
        self.inner
            .read()
            .expect("lock poisoned")
            .get_all()
            .into_iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Per-step-locked range cursor. Each `next()` call takes a fresh read
    /// lock, finds the first live entry strictly after the last one this
    /// cursor emitted, and releases the lock before returning.
    pub fn range(&self, start: Option<K>, end: Option<K>) -> BTreeResult<ConcurrentRangeIter<K, V>>
    where
        V: Clone,
    {
        if let (Some(s), Some(e)) = (&start, &end) {
            if s > e {
                return Err(BPlusTreeError::RangeOrder);
            }
        }
        Ok(ConcurrentRangeIter {
            inner: Arc::clone(&self.inner),
            last: None,
            first: true,
            start,
            end,
        })
    }
}

impl<K: Ord + Clone, V> Default for ConcurrentTreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ConcurrentRangeIter<K, V> {
    inner: Arc<RwLock<TreeMap<K, V>>>,
    last: Option<K>,
    first: bool,
    start: Option<K>,
    end: Option<K>,
}

impl<K: Ord + Clone, V: Clone> Iterator for ConcurrentRangeIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let guard = self.inner.read().expect("lock poisoned");
        let was_first = self.first;
        let lower = if was_first {
            self.first = false;
            self.start.clone()
        } else {
            self.last.clone()
        };
        let mut it = guard.range(lower.clone(), self.end.clone()).ok()?;
        let mut item = it.next()?;
        if !was_first {
            if let Some(after) = &lower {
                if item.0 == after {
                    item = it.next()?;
                }
            }
        }
        let (k, v) = (item.0.clone(), item.1.clone());
        self.last = Some(k.clone());
        Some((k, v))
    }
}
