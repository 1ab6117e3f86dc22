//! # ReviewWorkflow
//!
//! The submission review state machine. Per submission the conceptual
//! states are `Unconfirmed/Unlocked → Unconfirmed/UnderReview(admin) →
//! {Confirmed | Deleted}`; the two terminal states live in the store, the
//! middle one in the [`ReviewLedger`]. The workflow validates every
//! transition against the ledger, applies it to the store, and emits
//! [`Notice`] intents instead of delivering anything itself.

use std::sync::Arc;

use tracing::{debug, info};

use domains::{
    DomainError, DomainResult, Notice, NoticeEvent, Submission, SubmissionId, SubmissionStore,
    UserDirectory, UserId,
};

use crate::ledger::ReviewLedger;

/// Outcome of asking for the next submission to review. An empty queue is
/// a normal result, not an error.
#[derive(Debug)]
pub enum NextReview {
    Assigned(Submission),
    QueueEmpty,
}

/// A successful confirmation, with the owner notice to deliver.
#[derive(Debug)]
pub struct Accepted {
    pub submission: Submission,
    pub notice: Notice,
}

/// A successful rejection. The submission no longer exists in the store;
/// the payload here is the last copy, for the owner notice.
#[derive(Debug)]
pub struct Rejected {
    pub submission: Submission,
    pub notice: Notice,
}

/// Orchestrates assign → accept/reject/edit over the store and the ledger.
pub struct ReviewWorkflow {
    store: Arc<dyn SubmissionStore>,
    users: Arc<dyn UserDirectory>,
    ledger: Arc<ReviewLedger>,
}

impl ReviewWorkflow {
    pub fn new(
        store: Arc<dyn SubmissionStore>,
        users: Arc<dyn UserDirectory>,
        ledger: Arc<ReviewLedger>,
    ) -> Self {
        Self { store, users, ledger }
    }

    /// Hands the oldest unclaimed unconfirmed submission to `admin` and
    /// records the claim in the ledger.
    ///
    /// An admin holds at most one claim: any claim left over from an
    /// earlier `request_next` is dropped before a new one is taken.
    pub async fn request_next(&self, admin: UserId) -> DomainResult<NextReview> {
        let user = self.users.get_user(admin).await?;
        if !user.access_level.can_confirm() {
            return Err(DomainError::PermissionDenied(format!(
                "user {admin} may not review submissions"
            )));
        }

        if let Some(stale) = self.ledger.active_submission_for(admin) {
            debug!(%admin, submission = %stale, "dropping stale review claim");
            self.ledger.release(stale);
        }

        let pending = self.store.list_unconfirmed().await?;
        for submission in pending {
            if self.ledger.held_by(submission.id).is_some() {
                continue;
            }
            if self.ledger.try_acquire(submission.id, admin) {
                info!(%admin, submission = %submission.id, "submission assigned for review");
                return Ok(NextReview::Assigned(submission));
            }
            // Claimed by a concurrent reviewer between the scan and the
            // acquire; move on to the next candidate.
            debug!(%admin, submission = %submission.id, "lost acquire race, rescanning");
        }
        Ok(NextReview::QueueEmpty)
    }

    /// Confirms the submission. Requires the caller to hold the review
    /// claim; the claim is released only after the store transition
    /// succeeds, so a failed confirm leaves the admin mid-review.
    pub async fn accept(&self, submission: SubmissionId, admin: UserId) -> DomainResult<Accepted> {
        match self.ledger.held_by(submission) {
            Some(holder) if holder == admin => {}
            _ => return Err(DomainError::NotReviewOwner(submission, admin)),
        }

        let confirmed = self.store.set_confirmed(submission, admin).await?;
        self.ledger.release(submission);
        info!(%admin, submission = %confirmed.id, "submission confirmed");

        let notice = Notice {
            recipient: confirmed.owner,
            event: NoticeEvent::Confirmed {
                submission: confirmed.clone(),
            },
        };
        Ok(Accepted {
            submission: confirmed,
            notice,
        })
    }

    /// Rejects whatever `admin` is currently reviewing and deletes it.
    /// The reason is passed through in the owner notice, never stored.
    pub async fn reject(&self, admin: UserId, reason: &str) -> DomainResult<Rejected> {
        let id = self
            .ledger
            .active_submission_for(admin)
            .ok_or(DomainError::NoActiveReview(admin))?;

        let submission = self.store.get(id).await?;
        self.store.delete(id).await?;
        self.ledger.release(id);
        info!(%admin, submission = %id, "submission rejected and deleted");

        let notice = Notice {
            recipient: submission.owner,
            event: NoticeEvent::Rejected {
                submission: submission.clone(),
                reason: reason.to_string(),
            },
        };
        Ok(Rejected { submission, notice })
    }

    /// Acknowledges an edit request for a submission under review. No
    /// state changes; the review claim stays in place while the admin is
    /// mid-review.
    // TODO: wire the description editor once the submission edit flow lands.
    pub async fn edit(&self, submission: SubmissionId) -> DomainResult<Submission> {
        self.store.get(submission).await
    }

    pub fn ledger(&self) -> &ReviewLedger {
        &self.ledger
    }
}
