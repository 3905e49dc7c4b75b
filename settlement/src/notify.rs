//! Fire-and-forget seller notifications
//!
//! Delivery is best-effort by contract: a failed or dropped notification
//! never rolls back the settlement operation that produced it. The engine
//! hands messages to a [`NotifierHandle`], which feeds a bounded mpsc
//! mailbox drained by a single spawned task that owns the [`NotifySink`].
//!
//! ```text
//! SettlementEngine ──try_send──▶ mailbox ──▶ notifier task ──▶ NotifySink
//!                      │                          │
//!                  full: warn + drop       error: warn + drop
//! ```

use serde_json::Value;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A message for a recipient, rendered by the external mailer
#[derive(Debug, Clone)]
pub struct Notification {
    /// Recipient email address
    pub recipient: String,

    /// Template name understood by the mailer
    pub template: String,

    /// Template payload
    pub payload: Value,
}

/// Delivery backend (external mailer, message bus, test double)
pub trait NotifySink: Send + Sync {
    /// Deliver one notification
    fn send(&self, notification: &Notification) -> Result<(), String>;
}

/// Sink that discards everything
#[derive(Debug, Clone, Copy)]
pub struct NoopSink;

impl NotifySink for NoopSink {
    fn send(&self, _notification: &Notification) -> Result<(), String> {
        Ok(())
    }
}

/// Handle for enqueueing notifications
#[derive(Debug, Clone)]
pub struct NotifierHandle {
    tx: mpsc::Sender<Notification>,
}

impl NotifierHandle {
    /// Enqueue a notification without blocking
    ///
    /// A full mailbox drops the message with a warning; the caller never
    /// observes a failure.
    pub fn notify(&self, notification: Notification) {
        if let Err(err) = self.tx.try_send(notification) {
            tracing::warn!("Notification dropped: {}", err);
        }
    }
}

/// Spawn the notifier task
///
/// The task drains the mailbox until every handle is dropped, logging and
/// discarding delivery errors.
pub fn spawn_notifier(
    sink: std::sync::Arc<dyn NotifySink>,
    capacity: usize,
) -> (NotifierHandle, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::channel::<Notification>(capacity);

    let task = tokio::spawn(async move {
        while let Some(notification) = rx.recv().await {
            match sink.send(&notification) {
                Ok(()) => tracing::debug!(
                    recipient = %notification.recipient,
                    template = %notification.template,
                    "Notification delivered"
                ),
                Err(err) => tracing::warn!(
                    recipient = %notification.recipient,
                    template = %notification.template,
                    "Notification delivery failed: {}",
                    err
                ),
            }
        }
        tracing::debug!("Notifier mailbox closed");
    });

    (NotifierHandle { tx }, task)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Default)]
    struct RecordingSink {
        sent: Mutex<Vec<Notification>>,
    }

    impl NotifySink for RecordingSink {
        fn send(&self, notification: &Notification) -> Result<(), String> {
            self.sent.lock().push(notification.clone());
            Ok(())
        }
    }

    struct FailingSink;

    impl NotifySink for FailingSink {
        fn send(&self, _notification: &Notification) -> Result<(), String> {
            Err("smtp unreachable".to_string())
        }
    }

    fn notification() -> Notification {
        Notification {
            recipient: "seller@example.com".to_string(),
            template: "transaction_created".to_string(),
            payload: serde_json::json!({ "bookTitle": "Dune" }),
        }
    }

    #[tokio::test]
    async fn notifications_reach_the_sink() {
        let sink = Arc::new(RecordingSink::default());
        let (handle, task) = spawn_notifier(sink.clone(), 8);

        handle.notify(notification());
        drop(handle);
        task.await.unwrap();

        let sent = sink.sent.lock();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].template, "transaction_created");
    }

    #[tokio::test]
    async fn delivery_failure_is_swallowed() {
        let (handle, task) = spawn_notifier(Arc::new(FailingSink), 8);
        handle.notify(notification());
        drop(handle);
        // The task finishes cleanly even though every send failed
        task.await.unwrap();
    }
}
