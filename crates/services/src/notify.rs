//! Notice dispatch. Delivery failure is logged and never retried.

use tracing::warn;

use domains::{Notice, Notifier};

/// Hands a notice to the notifier collaborator. A failed delivery is
/// logged at warn and otherwise dropped.
pub async fn dispatch(notifier: &dyn Notifier, notice: &Notice) {
    if let Err(err) = notifier.deliver(notice).await {
        warn!(recipient = %notice.recipient, %err, "notice delivery failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::{DomainError, MockNotifier, NoticeEvent, Submission, SubmissionId, SubmissionKind, Profile, UserId, UNSPECIFIED};

    fn notice() -> Notice {
        Notice {
            recipient: UserId(100),
            event: NoticeEvent::Confirmed {
                submission: Submission {
                    id: SubmissionId(1),
                    owner: UserId(100),
                    submitted_at: chrono::Utc::now(),
                    is_confirmed: true,
                    admin: Some(UserId(10)),
                    university: UNSPECIFIED.to_string(),
                    faculty: UNSPECIFIED.to_string(),
                    description: String::new(),
                    search_text: String::new(),
                    kind: SubmissionKind::Profile(Profile {
                        title: "استاد نمونه".to_string(),
                        email: String::new(),
                        phone_number: String::new(),
                        image_link: String::new(),
                        image_id: String::new(),
                        resume_link: String::new(),
                        resume_id: String::new(),
                    }),
                },
            },
        }
    }

    #[tokio::test]
    async fn delivery_failure_is_swallowed() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_deliver()
            .returning(|_| Err(DomainError::Storage("transport down".to_string())));
        // Must not propagate the error.
        dispatch(&notifier, &notice()).await;
    }

    #[tokio::test]
    async fn delivery_success_calls_notifier_once() {
        let mut notifier = MockNotifier::new();
        notifier.expect_deliver().times(1).returning(|_| Ok(()));
        dispatch(&notifier, &notice()).await;
    }
}
