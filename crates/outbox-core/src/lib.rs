//! Core task execution for the Outbox mail pipeline.
//!
//! This crate provides:
//! - A one-shot [`Promise`]/[`TaskFuture`] pair with blocking reads and
//!   non-blocking composition
//! - Pooled and direct (same-thread) [`Executor`] implementations
//! - A recovery combinator that substitutes a fallback outcome for one
//!   specific failure kind
//!
//! A task is any `FnOnce() -> TaskResult<T>` closure. Submitting it to an
//! executor yields a [`TaskFuture`] that settles exactly once, either with
//! the task's value or with its [`TaskError`]. Failures carry an
//! [`ErrorKind`] tag so a recovery combinator can match one kind by
//! equality and leave every other failure untouched.

pub mod error;
pub mod executor;
pub mod future;

mod recover;

pub use error::{ErrorKind, TaskError, TaskResult};
pub use executor::{DirectExecutor, Executor, PooledExecutor};
pub use future::{Promise, TaskFuture};
