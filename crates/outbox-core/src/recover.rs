//! Recovery combinator: substitute a fallback outcome for one failure kind.

use crate::error::{ErrorKind, TaskResult};
use crate::executor::Executor;
use crate::future::{Promise, TaskFuture};

impl<T: Clone + Send + 'static> TaskFuture<T> {
    /// Derive a future that recovers failures of exactly `kind`.
    ///
    /// A completed source passes its value through unchanged and the
    /// fallback never runs. A source that failed with `kind` submits
    /// `fallback` to `executor` and adopts its outcome, success or failure,
    /// as the derived future's outcome; there is no second recovery and a
    /// failed fallback is never masked as success. Any other failure kind
    /// propagates unchanged. [`ErrorKind::Cancelled`] is never matched,
    /// even if configured.
    ///
    /// Construction never blocks. With a direct executor and a terminal
    /// source, the derived future is terminal upon return.
    pub fn recover_with<E, F>(&self, kind: ErrorKind, executor: &E, fallback: F) -> TaskFuture<T>
    where
        E: Executor + Clone + Send + 'static,
        F: FnOnce() -> TaskResult<T> + Send + 'static,
    {
        let promise = Promise::new();
        let recovered = promise.future();
        let executor = executor.clone();

        self.on_settled(move |outcome| match outcome {
            Ok(value) => {
                promise.complete(value.clone());
            }
            Err(error) if error.kind() == kind && kind != ErrorKind::Cancelled => {
                tracing::debug!("recovering {kind:?} failure with the fallback task");
                executor.submit(fallback).on_settled(move |fallback_outcome| {
                    promise.settle(fallback_outcome.clone());
                });
            }
            Err(error) => {
                tracing::debug!(
                    "failure kind {:?} does not match {kind:?}; propagating",
                    error.kind()
                );
                promise.fail(error.clone());
            }
        });

        recovered
    }
}
