//! Mail transport collaborator seam.

use outbox_core::TaskResult;

use crate::process::ProcessResult;

/// Delivers a message through some external channel.
///
/// The dispatcher treats the transport as an opaque task: it never inspects
/// how delivery happens, only the outcome. Implementations report a failed
/// delivery as [`TaskError::MailDelivery`](outbox_core::TaskError) so the
/// recovery path can tell it apart from every other failure.
pub trait MailTransport: Send + Sync {
    /// Attempt to deliver `message`.
    fn send(&self, message: &str) -> TaskResult<ProcessResult>;
}
