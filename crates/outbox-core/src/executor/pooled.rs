//! Bounded worker-pool executor.

use std::sync::Arc;

use crate::error::{TaskError, TaskResult};
use crate::future::{Promise, TaskFuture};

use super::{Executor, run_task};

/// Executor that runs tasks on a fixed-size pool of worker threads.
///
/// Submission is non-blocking: the task is enqueued and a pending future
/// returned immediately. Tasks submitted concurrently may run in parallel
/// and complete in any order. The handle is cheap to clone and every clone
/// shares the same pool.
#[derive(Clone)]
pub struct PooledExecutor {
    pool: Arc<rayon::ThreadPool>,
}

impl PooledExecutor {
    /// Start a pool with the given number of worker threads.
    pub fn new(threads: usize) -> TaskResult<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("outbox-worker-{index}"))
            .build()
            .map_err(|e| TaskError::unknown(format!("failed to start worker pool: {e}")))?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Number of worker threads in the pool.
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl Executor for PooledExecutor {
    fn submit<T, F>(&self, task: F) -> TaskFuture<T>
    where
        T: Clone + Send + 'static,
        F: FnOnce() -> TaskResult<T> + Send + 'static,
    {
        let promise = Promise::new();
        let future = promise.future();

        tracing::debug!("submitting task to the worker pool");
        self.pool.spawn(move || {
            let outcome = run_task(task);
            if let Err(error) = &outcome {
                tracing::debug!("task failed on a pool worker: {error}");
            }
            promise.settle(outcome);
        });

        future
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_executes_a_submitted_task() {
        let executor = PooledExecutor::new(2).expect("pool should start");

        let future = executor.submit(|| Ok(6 * 7));

        assert_eq!(future.get(), Ok(42));
    }

    #[test]
    fn test_pool_has_the_requested_width() {
        let executor = PooledExecutor::new(3).expect("pool should start");

        assert_eq!(executor.threads(), 3);
    }

    #[test]
    fn test_submit_returns_before_the_task_finishes() {
        let executor = PooledExecutor::new(1).expect("pool should start");
        let (release, gate) = mpsc::channel::<()>();

        let future = executor.submit(move || {
            gate.recv().ok();
            Ok("released")
        });

        assert!(!future.is_done());
        release.send(()).expect("worker should be waiting on the gate");
        assert_eq!(future.get(), Ok("released"));
    }

    #[test]
    fn test_independent_tasks_complete_in_either_order() {
        let executor = PooledExecutor::new(2).expect("pool should start");

        let slow = executor.submit(|| {
            thread::sleep(Duration::from_millis(30));
            Ok("slow")
        });
        let fast = executor.submit(|| Ok("fast"));

        assert_eq!(fast.get(), Ok("fast"));
        assert_eq!(slow.get(), Ok("slow"));
    }

    #[test]
    fn test_pool_survives_a_panicking_task() {
        let executor = PooledExecutor::new(1).expect("pool should start");

        let poisoned: TaskFuture<i32> = executor.submit(|| panic!("task bug"));
        assert!(matches!(poisoned.get(), Err(TaskError::Unknown(_))));

        let healthy = executor.submit(|| Ok(1));
        assert_eq!(healthy.get(), Ok(1));
    }
}
