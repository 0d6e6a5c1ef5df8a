//! Same-thread executor.

use crate::error::TaskResult;
use crate::future::{Promise, TaskFuture};

use super::{Executor, run_task};

/// Executor that runs each task inline on the submitting thread.
///
/// Synchronous execution is a scheduling policy in its own right, not a
/// test-only device: the future an inline `submit` returns is already
/// terminal, so there is no race between submission and observation.
///
/// # Example
///
/// ```
/// use outbox_core::{DirectExecutor, Executor};
///
/// let future = DirectExecutor.submit(|| Ok(2 + 2));
/// assert!(future.is_done());
/// assert_eq!(future.get(), Ok(4));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectExecutor;

impl Executor for DirectExecutor {
    fn submit<T, F>(&self, task: F) -> TaskFuture<T>
    where
        T: Clone + Send + 'static,
        F: FnOnce() -> TaskResult<T> + Send + 'static,
    {
        let promise = Promise::new();
        let future = promise.future();

        let outcome = run_task(task);
        if let Err(error) = &outcome {
            tracing::debug!("task failed on the submitting thread: {error}");
        }
        promise.settle(outcome);

        future
    }
}
