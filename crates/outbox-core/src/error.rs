//! Error taxonomy for task execution and recovery.

use std::time::Duration;

use thiserror::Error;

/// Result type for task outcomes.
pub type TaskResult<T> = std::result::Result<T, TaskError>;

/// Failure tag used for recovery matching.
///
/// Recovery combinators match on the tag alone, by equality; two errors of
/// the same kind are interchangeable as far as recovery is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A mail transport could not deliver a message.
    MailDelivery,
    /// A blocking read gave up before the future settled.
    Timeout,
    /// The future was cancelled while still pending.
    Cancelled,
    /// Catch-all for failures with no recovery path.
    Unknown,
}

/// Errors that can settle a future or abort a blocking read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    /// A mail transport could not deliver a message.
    #[error("mail delivery failed: {0}")]
    MailDelivery(String),

    /// A [`get_timeout`](crate::TaskFuture::get_timeout) deadline elapsed
    /// before the future settled. Never stored in the future itself.
    #[error("timed out after {0:?} waiting for a task outcome")]
    Timeout(Duration),

    /// The future was cancelled while still pending.
    #[error("task was cancelled before it completed")]
    Cancelled,

    /// Unclassified failure: captured panics, collaborator I/O, anything
    /// without a recovery path.
    #[error("task failed: {0}")]
    Unknown(String),
}

impl TaskError {
    /// Build a mail delivery failure.
    pub fn mail_delivery(message: impl Into<String>) -> Self {
        Self::MailDelivery(message.into())
    }

    /// Build an unclassified failure.
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::Unknown(message.into())
    }

    /// The tag a recovery combinator matches against.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MailDelivery(_) => ErrorKind::MailDelivery,
            Self::Timeout(_) => ErrorKind::Timeout,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::Unknown(_) => ErrorKind::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_variant_maps_to_its_kind() {
        assert_eq!(
            TaskError::mail_delivery("relay refused").kind(),
            ErrorKind::MailDelivery
        );
        assert_eq!(
            TaskError::Timeout(Duration::from_secs(1)).kind(),
            ErrorKind::Timeout
        );
        assert_eq!(TaskError::Cancelled.kind(), ErrorKind::Cancelled);
        assert_eq!(TaskError::unknown("disk on fire").kind(), ErrorKind::Unknown);
    }

    #[test]
    fn test_display_keeps_the_underlying_message() {
        let error = TaskError::mail_delivery("relay refused the message");
        assert_eq!(
            error.to_string(),
            "mail delivery failed: relay refused the message"
        );
    }

    #[test]
    fn test_matching_is_by_kind_not_by_message() {
        let first = TaskError::mail_delivery("relay one");
        let second = TaskError::mail_delivery("relay two");
        assert_ne!(first, second);
        assert_eq!(first.kind(), second.kind());
    }
}
