//! Email dispatch with a durable fallback, built on Outbox task futures.
//!
//! Composes the outbox-core executors and recovery combinator into a
//! "send it, else spool it" service:
//!
//! ```text
//! message ───► EmailDispatcher ───► MailTransport::send ───► Success
//!                    │
//!                    │ MailDelivery failure
//!                    ▼
//!       EmailQueue::persist_for_later ───► Success (queued)
//! ```
//!
//! Only a delivery failure takes the fallback path. Every other failure
//! kind, including a failing queue, surfaces to the caller unconverted.

mod dispatch;
mod process;
mod queue;
mod transport;

pub use dispatch::EmailDispatcher;
pub use process::ProcessResult;
pub use queue::{EmailQueue, FileSpool, SpoolEntry, SpoolError};
pub use transport::MailTransport;
