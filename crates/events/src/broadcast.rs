//! Bulk mail to residents.
//!
//! [`BulkMailer::dispatch`] spawns a detached task that sends the same
//! message to every recipient in turn. A failure for one recipient is logged
//! and the loop moves on; nothing is reported back to the HTTP caller.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::delivery::email::MailTransport;

/// Outcome of one broadcast, returned from the spawned task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    pub sent: usize,
    pub failed: usize,
}

#[derive(Clone)]
pub struct BulkMailer {
    transport: Arc<dyn MailTransport>,
}

impl BulkMailer {
    pub fn new(transport: Arc<dyn MailTransport>) -> Self {
        Self { transport }
    }

    /// Send `subject`/`body` to each recipient on a background task.
    ///
    /// Callers normally drop the handle; tests await it for the report.
    pub fn dispatch(
        &self,
        recipients: Vec<String>,
        subject: String,
        body: String,
    ) -> JoinHandle<BroadcastReport> {
        let transport = Arc::clone(&self.transport);
        tokio::spawn(async move {
            let mut report = BroadcastReport::default();
            for to in &recipients {
                match transport.send(to, &subject, &body).await {
                    Ok(()) => report.sent += 1,
                    Err(e) => {
                        report.failed += 1;
                        tracing::warn!(to = %to, error = %e, "Broadcast email failed");
                    }
                }
            }
            tracing::info!(
                sent = report.sent,
                failed = report.failed,
                subject = %subject,
                "Broadcast finished"
            );
            report
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::delivery::email::EmailError;

    /// Records every send; rejects addresses containing "bounce".
    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl MailTransport for RecordingTransport {
        async fn send(&self, to: &str, _subject: &str, _body: &str) -> Result<(), EmailError> {
            if to.contains("bounce") {
                return Err(EmailError::Build(format!("rejected {to}")));
            }
            self.sent.lock().unwrap().push(to.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn one_failure_does_not_stop_the_rest() {
        let transport = Arc::new(RecordingTransport::default());
        let mailer = BulkMailer::new(transport.clone());

        let report = mailer
            .dispatch(
                vec![
                    "a@example.com".into(),
                    "bounce@example.com".into(),
                    "c@example.com".into(),
                ],
                "Aviso".into(),
                "Corte de água".into(),
            )
            .await
            .unwrap();

        assert_eq!(report, BroadcastReport { sent: 2, failed: 1 });
        assert_eq!(
            *transport.sent.lock().unwrap(),
            ["a@example.com", "c@example.com"]
        );
    }

    #[tokio::test]
    async fn empty_recipient_list_sends_nothing() {
        let mailer = BulkMailer::new(Arc::new(RecordingTransport::default()));
        let report = mailer
            .dispatch(Vec::new(), "s".into(), "b".into())
            .await
            .unwrap();
        assert_eq!(report, BroadcastReport::default());
    }
}
