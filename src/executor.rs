//! The parallel work-executor contract (spec.md §5). Out of scope as a
//! full scheduler; specified here only to the depth its call sites need:
//! a trait boundary plus a zero-dependency sequential default and an
//! optional `rayon`-backed implementation.

use alloc::boxed::Box;
use alloc::vec::Vec;

/// A unit of work submitted to an [`Executor`]. Boxed so callers can hand
/// over heterogeneous closures (one per subtree) in a single batch.
pub type Task<'a> = Box<dyn FnOnce() + Send + 'a>;

/// A fork-join work executor. The R-tree's parallel `intersect`/`get_all`
/// variants delegate one task per subtree to an `Executor`; the sink
/// passed to those variants must be safe to invoke concurrently from
/// whichever threads the executor runs tasks on.
pub trait Executor {
    /// Run every task to completion before returning. Implementations may
    /// run tasks concurrently or sequentially; callers must not assume
    /// either.
    fn join_all(&self, tasks: Vec<Task<'_>>);
}

/// Runs every task on the calling thread, in order. The default when no
/// parallelism is requested.
#[derive(Debug, Default, Clone, Copy)]
pub struct SequentialExecutor;

impl Executor for SequentialExecutor {
    fn join_all(&self, tasks: Vec<Task<'_>>) {
        for task in tasks {
            task();
        }
    }
}

/// Runs tasks on the global `rayon` thread pool, capped at `max_in_flight`
/// concurrent subtree tasks if set — the "optional parallelism-limit
/// variant" spec.md §5 mentions.
#[cfg(feature = "parallel")]
#[derive(Debug, Default, Clone, Copy)]
pub struct RayonExecutor {
    pub max_in_flight: Option<usize>,
}

#[cfg(feature = "parallel")]
impl Executor for RayonExecutor {
    fn join_all(&self, tasks: Vec<Task<'_>>) {
        use rayon::prelude::*;
        match self.max_in_flight {
            None => tasks.into_par_iter().for_each(|task| task()),
            Some(limit) => {
                // rayon has no per-call concurrency cap; approximate one
                // by running the batch in sequential groups of `limit`,
                // each group itself run in parallel.
                let limit = limit.max(1);
                let mut remaining = tasks;
                while !remaining.is_empty() {
                    let split_at = limit.min(remaining.len());
                    let rest = remaining.split_off(split_at);
                    remaining.into_par_iter().for_each(|task| task());
                    remaining = rest;
                }
            }
        }
    }
}
