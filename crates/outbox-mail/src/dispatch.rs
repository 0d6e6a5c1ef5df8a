//! Send-with-fallback dispatch service.

use std::sync::Arc;

use outbox_core::{ErrorKind, Executor, TaskFuture};

use crate::process::ProcessResult;
use crate::queue::EmailQueue;
use crate::transport::MailTransport;

/// Dispatches messages through a transport, falling back to a durable
/// queue when delivery fails.
pub struct EmailDispatcher<E> {
    executor: E,
    transport: Arc<dyn MailTransport>,
    queue: Arc<dyn EmailQueue>,
}

impl<E> EmailDispatcher<E>
where
    E: Executor + Clone + Send + 'static,
{
    /// Build a dispatcher over an executor and its two collaborators.
    pub fn new(
        executor: E,
        transport: Arc<dyn MailTransport>,
        queue: Arc<dyn EmailQueue>,
    ) -> Self {
        Self {
            executor,
            transport,
            queue,
        }
    }

    /// Send `message`, queueing it for later if delivery fails.
    ///
    /// The returned future resolves to [`ProcessResult::Success`] when the
    /// transport delivered the message or the queue accepted it. It fails
    /// when the send failed with something other than a delivery failure,
    /// or when the queue itself failed; neither case is folded into
    /// [`ProcessResult::Error`].
    pub fn send_with_fallback(&self, message: &str) -> TaskFuture<ProcessResult> {
        let transport = Arc::clone(&self.transport);
        let body = message.to_owned();
        let sent = self.executor.submit(move || transport.send(&body));

        let queue = Arc::clone(&self.queue);
        let body = message.to_owned();
        sent.recover_with(ErrorKind::MailDelivery, &self.executor, move || {
            tracing::warn!("mail delivery failed; queueing the message for later");
            queue.persist_for_later(&body)
        })
    }
}
