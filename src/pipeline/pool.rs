//! Fixed-size worker pool with submission-ordered results

use crate::io::error::{MosaicError, Result, invalid_parameter};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

/// Explicitly constructed pool of worker threads
///
/// Tasks may finish in any order; [`WorkerPool::map_ordered`] returns their
/// results in the order the inputs were given.
pub struct WorkerPool {
    pool: ThreadPool,
    workers: usize,
}

impl WorkerPool {
    /// Start `workers` threads
    ///
    /// # Errors
    ///
    /// Returns an error if `workers` is zero or the threads cannot be spawned
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(invalid_parameter(
                "workers",
                &workers,
                &"must be at least 1",
            ));
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("mosaic-worker-{i}"))
            .build()
            .map_err(|e| MosaicError::WorkerPool { workers, source: e })?;
        Ok(Self { pool, workers })
    }

    /// Number of worker threads
    pub const fn workers(&self) -> usize {
        self.workers
    }

    /// Apply `task` to every item on the pool, keeping input order
    ///
    /// # Errors
    ///
    /// Returns an error produced by a failing task; the whole batch fails and
    /// results of other tasks are discarded
    pub fn map_ordered<T, R, F>(&self, items: &[T], task: F) -> Result<Vec<R>>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> Result<R> + Sync + Send,
    {
        self.pool
            .install(|| items.par_iter().map(task).collect::<Result<Vec<R>>>())
    }
}
