//! One-shot futures for task outcomes.
//!
//! A [`Promise`] is the settle side and a [`TaskFuture`] the read side of a
//! single shared state cell. The cell transitions at most once, from
//! pending to a terminal outcome, and the terminal outcome never changes
//! afterwards. Continuations attached through [`TaskFuture::map`] or the
//! recovery combinator run after that transition, exactly once.

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::error::{TaskError, TaskResult};

type Continuation<T> = Box<dyn FnOnce(&TaskResult<T>) + Send + 'static>;

/// State cell shared between a promise and its futures.
struct Shared<T> {
    state: Mutex<Inner<T>>,
    done: Condvar,
}

struct Inner<T> {
    outcome: Option<TaskResult<T>>,
    continuations: Vec<Continuation<T>>,
}

impl<T: Clone> Shared<T> {
    fn new() -> Self {
        Self {
            state: Mutex::new(Inner {
                outcome: None,
                continuations: Vec::new(),
            }),
            done: Condvar::new(),
        }
    }

    /// The lock is never held while task bodies or continuations run, so a
    /// poisoned guard still protects consistent state.
    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Publish the terminal outcome. Returns whether this call won the
    /// one-time transition; losing outcomes are dropped.
    fn settle(&self, outcome: TaskResult<T>) -> bool {
        let continuations = {
            let mut inner = self.lock();
            if inner.outcome.is_some() {
                return false;
            }
            inner.outcome = Some(outcome.clone());
            std::mem::take(&mut inner.continuations)
        };

        self.done.notify_all();
        for continuation in continuations {
            continuation(&outcome);
        }
        true
    }
}

/// Settle side of a one-shot future.
///
/// Executors settle promises internally; the type is also public so
/// collaborators that hand out futures can be replaced in tests by a
/// promise settled directly, without a live executor.
pub struct Promise<T> {
    shared: Arc<Shared<T>>,
}

impl<T: Clone> Promise<T> {
    /// Create a pending promise.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared::new()),
        }
    }

    /// A future observing this promise's outcome.
    pub fn future(&self) -> TaskFuture<T> {
        TaskFuture {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Settle with a value. Returns whether this call performed the
    /// transition; a promise that already settled is left unchanged.
    pub fn complete(&self, value: T) -> bool {
        self.shared.settle(Ok(value))
    }

    /// Settle with a failure. Same one-time contract as [`complete`].
    ///
    /// [`complete`]: Promise::complete
    pub fn fail(&self, error: TaskError) -> bool {
        self.shared.settle(Err(error))
    }

    /// Settle with an already-formed outcome.
    pub(crate) fn settle(&self, outcome: TaskResult<T>) -> bool {
        self.shared.settle(outcome)
    }
}

impl<T: Clone> Default for Promise<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A one-time, terminal-state handle to a task's eventual outcome.
///
/// Cheap to clone; all clones observe the same cell. Once terminal, the
/// outcome is immutable and any number of threads may read it concurrently.
#[derive(Clone)]
pub struct TaskFuture<T> {
    shared: Arc<Shared<T>>,
}

impl<T: Clone> TaskFuture<T> {
    /// True once the future reached its terminal state.
    pub fn is_done(&self) -> bool {
        self.shared.lock().outcome.is_some()
    }

    /// Block until the future settles, then return its outcome.
    ///
    /// Idempotent: repeated calls observe the same outcome and never
    /// re-execute the underlying task.
    pub fn get(&self) -> TaskResult<T> {
        let mut inner = self.shared.lock();
        loop {
            if let Some(outcome) = &inner.outcome {
                return outcome.clone();
            }
            inner = self
                .shared
                .done
                .wait(inner)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// As [`get`], but give up after `timeout`.
    ///
    /// An expired deadline fails the *read* with [`TaskError::Timeout`];
    /// the future itself stays pending and a later read can still succeed.
    ///
    /// [`get`]: TaskFuture::get
    pub fn get_timeout(&self, timeout: Duration) -> TaskResult<T> {
        let deadline = Instant::now() + timeout;
        let mut inner = self.shared.lock();
        loop {
            if let Some(outcome) = &inner.outcome {
                return outcome.clone();
            }
            let now = Instant::now();
            if now >= deadline {
                return Err(TaskError::Timeout(timeout));
            }
            let (guard, _) = self
                .shared
                .done
                .wait_timeout(inner, deadline - now)
                .unwrap_or_else(PoisonError::into_inner);
            inner = guard;
        }
    }

    /// Settle a still-pending future as failed with
    /// [`TaskError::Cancelled`]. Returns whether this call performed the
    /// transition.
    ///
    /// A task already running is not interrupted; its outcome simply loses
    /// the one-time settle race and is dropped.
    pub fn cancel(&self) -> bool {
        self.shared.settle(Err(TaskError::Cancelled))
    }

    /// Derive a future holding `f` applied to this future's value.
    ///
    /// Never blocks. If this future fails, the derived future fails with
    /// the same error untouched; `map` never intercepts failures.
    pub fn map<U, F>(&self, f: F) -> TaskFuture<U>
    where
        U: Clone + Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        let promise = Promise::new();
        let mapped = promise.future();

        self.on_settled(move |outcome| match outcome {
            Ok(value) => {
                promise.complete(f(value.clone()));
            }
            Err(error) => {
                promise.fail(error.clone());
            }
        });

        mapped
    }

    /// Run `continuation` once the future is terminal.
    ///
    /// On an already-terminal future the continuation runs immediately on
    /// the calling thread; otherwise it runs on the settling thread, after
    /// the outcome is published and outside the state lock.
    pub(crate) fn on_settled(&self, continuation: impl FnOnce(&TaskResult<T>) + Send + 'static) {
        let outcome = {
            let mut inner = self.shared.lock();
            match inner.outcome.clone() {
                Some(outcome) => outcome,
                None => {
                    inner.continuations.push(Box::new(continuation));
                    return;
                }
            }
        };
        continuation(&outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn test_promise_settles_future_once() {
        let promise = Promise::new();
        let future = promise.future();
        assert!(!future.is_done());

        assert!(promise.complete(7));
        assert!(future.is_done());
        assert_eq!(future.get(), Ok(7));

        // Losing settle attempts leave the first outcome in place.
        assert!(!promise.complete(8));
        assert!(!promise.fail(TaskError::unknown("late failure")));
        assert_eq!(future.get(), Ok(7));
    }

    #[test]
    fn test_get_blocks_until_settled() {
        let promise = Promise::new();
        let future = promise.future();

        let reader = thread::spawn(move || future.get());
        thread::sleep(Duration::from_millis(20));
        promise.complete("done".to_string());

        assert_eq!(reader.join().expect("reader thread"), Ok("done".to_string()));
    }

    #[test]
    fn test_expired_read_leaves_the_future_pending() {
        let promise = Promise::new();
        let future = promise.future();
        let timeout = Duration::from_millis(10);

        assert_eq!(future.get_timeout(timeout), Err(TaskError::Timeout(timeout)));
        assert!(!future.is_done());

        promise.complete(3);
        assert_eq!(future.get(), Ok(3));
    }

    #[test]
    fn test_map_transforms_the_value() {
        let promise = Promise::new();
        let doubled = promise.future().map(|value: i32| value * 2);

        promise.complete(21);
        assert_eq!(doubled.get(), Ok(42));
    }

    #[test]
    fn test_map_propagates_failures_untouched() {
        let promise: Promise<i32> = Promise::new();
        let mapped = promise.future().map(|value| value + 1);

        promise.fail(TaskError::mail_delivery("smtp down"));
        assert_eq!(mapped.get(), Err(TaskError::mail_delivery("smtp down")));
    }

    #[test]
    fn test_continuation_on_terminal_future_runs_immediately() {
        let promise = Promise::new();
        promise.complete(5);

        let ran = Arc::new(AtomicUsize::new(0));
        let ran_in = Arc::clone(&ran);
        promise.future().on_settled(move |outcome| {
            assert_eq!(*outcome, Ok(5));
            ran_in.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(ran.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cancel_settles_a_pending_future() {
        let promise: Promise<i32> = Promise::new();
        let future = promise.future();

        assert!(future.cancel());
        assert_eq!(future.get(), Err(TaskError::Cancelled));

        // The task outcome arrives too late to matter.
        assert!(!promise.complete(1));
        assert_eq!(future.get(), Err(TaskError::Cancelled));
    }

    #[test]
    fn test_cancel_on_a_terminal_future_is_a_no_op() {
        let promise = Promise::new();
        let future = promise.future();
        promise.complete(9);

        assert!(!future.cancel());
        assert_eq!(future.get(), Ok(9));
    }
}
