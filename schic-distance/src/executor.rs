//! Execution of independent work units, sequentially or on a worker pool.
//!
//! Strategies describe their parallelizable work as `n_units` indexed tasks
//! and call [`Executor::map`]; results always come back in index order, so
//! the same strategy code serves both paths.

use schic_core::{Result, SchicError};

/// Runs indexed, independent tasks and gathers their results in order.
#[derive(Debug, Default)]
pub enum Executor {
    /// Run every task on the calling thread.
    #[default]
    Sequential,
    /// Run tasks on a dedicated fixed-size rayon pool.
    #[cfg(feature = "parallel")]
    Pool(rayon::ThreadPool),
}

impl Executor {
    /// Build an executor with `n_threads` workers.
    ///
    /// Without the `parallel` feature this falls back to [`Executor::Sequential`].
    ///
    /// # Errors
    ///
    /// Returns an error if `n_threads` is zero or the pool cannot be built.
    pub fn with_threads(n_threads: usize) -> Result<Self> {
        if n_threads == 0 {
            return Err(SchicError::InvalidInput(
                "worker pool needs at least one thread".into(),
            ));
        }
        #[cfg(feature = "parallel")]
        {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n_threads)
                .thread_name(|i| format!("schic-worker-{}", i))
                .build()
                .map_err(|e| SchicError::Worker(e.to_string()))?;
            Ok(Executor::Pool(pool))
        }
        #[cfg(not(feature = "parallel"))]
        {
            tracing::warn!(
                n_threads,
                "parallel feature disabled; running worker tasks sequentially"
            );
            Ok(Executor::Sequential)
        }
    }

    /// Whether tasks run on a worker pool.
    pub fn is_parallel(&self) -> bool {
        !matches!(self, Executor::Sequential)
    }

    /// Number of worker threads (1 for sequential execution).
    pub fn n_threads(&self) -> usize {
        match self {
            Executor::Sequential => 1,
            #[cfg(feature = "parallel")]
            Executor::Pool(pool) => pool.current_num_threads(),
        }
    }

    /// Run `task(0..n_units)` and collect the results in index order.
    ///
    /// Blocks until every task has finished. The first error aborts the
    /// whole map; a panicking task propagates its panic to the caller.
    pub fn map<R, F>(&self, n_units: usize, task: F) -> Result<Vec<R>>
    where
        R: Send,
        F: Fn(usize) -> Result<R> + Sync + Send,
    {
        match self {
            Executor::Sequential => (0..n_units).map(task).collect(),
            #[cfg(feature = "parallel")]
            Executor::Pool(pool) => {
                use rayon::prelude::*;
                pool.install(|| (0..n_units).into_par_iter().map(&task).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_preserves_order() {
        let out = Executor::Sequential.map(5, |i| Ok(i * 10)).unwrap();
        assert_eq!(out, vec![0, 10, 20, 30, 40]);
    }

    #[test]
    fn pool_preserves_order() {
        let exec = Executor::with_threads(4).unwrap();
        let out = exec.map(100, |i| Ok(i * i)).unwrap();
        let expected: Vec<usize> = (0..100).map(|i| i * i).collect();
        assert_eq!(out, expected);
    }

    #[test]
    fn error_aborts_map() {
        let exec = Executor::with_threads(2).unwrap();
        let res = exec.map(10, |i| {
            if i == 7 {
                Err(SchicError::Worker("task 7 failed".into()))
            } else {
                Ok(i)
            }
        });
        assert!(res.is_err());
        let res = Executor::Sequential.map(10, |i| {
            if i == 3 {
                Err(SchicError::Worker("task 3 failed".into()))
            } else {
                Ok(i)
            }
        });
        assert!(res.is_err());
    }

    #[test]
    #[should_panic(expected = "task 5 blew up")]
    fn panicking_task_aborts_pool_map() {
        let exec = Executor::with_threads(2).unwrap();
        let _ = exec.map(10, |i| {
            if i == 5 {
                panic!("task 5 blew up");
            }
            Ok(i)
        });
    }

    #[test]
    fn zero_threads_rejected() {
        assert!(Executor::with_threads(0).is_err());
    }

    #[test]
    fn empty_map() {
        let out: Vec<usize> = Executor::Sequential.map(0, Ok).unwrap();
        assert!(out.is_empty());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn pool_reports_threads() {
        let exec = Executor::with_threads(3).unwrap();
        assert!(exec.is_parallel());
        assert_eq!(exec.n_threads(), 3);
        assert!(!Executor::Sequential.is_parallel());
    }
}
