//! # notify-adapters
//!
//! Notifier implementations. The tracing notifier writes each notice to
//! the log stream; a chat transport adapter would replace it in a real
//! deployment without touching the workflow.

use async_trait::async_trait;
use tracing::info;

use domains::{DomainResult, Notice, NoticeEvent, Notifier};

/// Logs every notice at info level. Never fails.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for TracingNotifier {
    async fn deliver(&self, notice: &Notice) -> DomainResult<()> {
        match &notice.event {
            NoticeEvent::Confirmed { submission } => {
                info!(
                    recipient = %notice.recipient,
                    submission = %submission.id,
                    "notify: submission confirmed"
                );
            }
            NoticeEvent::Rejected { submission, reason } => {
                info!(
                    recipient = %notice.recipient,
                    submission = %submission.id,
                    %reason,
                    "notify: submission rejected"
                );
            }
        }
        Ok(())
    }
}
