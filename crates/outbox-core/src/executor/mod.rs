//! Task executors.
//!
//! An executor turns a submitted task into a [`TaskFuture`] bound to its
//! eventual outcome. Two scheduling policies are provided:
//!
//! - **`PooledExecutor`** - Runs tasks on a bounded pool of worker threads.
//!   Submission never blocks; tasks may run concurrently and complete in
//!   any order.
//! - **`DirectExecutor`** - Runs each task inline on the submitting thread.
//!   The returned future is already terminal when `submit` returns, which
//!   makes submission-then-assertion sequences deterministic.
//!
//! Either way, a task's `Err` return or panic is captured into the
//! future's failed state and never escapes the submission call.

mod direct;
mod pooled;

pub use direct::DirectExecutor;
pub use pooled::PooledExecutor;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::error::{TaskError, TaskResult};
use crate::future::TaskFuture;

/// Runs submitted tasks and hands back futures bound to their outcomes.
pub trait Executor {
    /// Submit a task for execution.
    fn submit<T, F>(&self, task: F) -> TaskFuture<T>
    where
        T: Clone + Send + 'static,
        F: FnOnce() -> TaskResult<T> + Send + 'static;
}

/// Run a task, converting a panic into the catch-all failure kind.
///
/// A buggy task must settle its future like any other failure instead of
/// unwinding through the executor (and, on the pooled variant, taking a
/// worker thread with it).
pub(crate) fn run_task<T, F>(task: F) -> TaskResult<T>
where
    F: FnOnce() -> TaskResult<T>,
{
    match panic::catch_unwind(AssertUnwindSafe(task)) {
        Ok(outcome) => outcome,
        Err(payload) => Err(TaskError::unknown(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "task panicked".to_string()
    }
}
