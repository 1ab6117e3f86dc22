//! # ReviewLedger
//!
//! In-process record of which admin is reviewing which submission. One
//! owned, injectable instance is shared by every concurrent review
//! session for the lifetime of the service; it is never persisted, so a
//! restart clears all claims.
//!
//! Known limitation: there is no expiry. An admin who never accepts or
//! rejects keeps the claim until the process exits (or until their next
//! `request_next` drops it).

use std::collections::HashMap;

use parking_lot::Mutex;

use domains::{SubmissionId, UserId};

/// Mapping from submission id to the admin currently reviewing it. All
/// operations take the single internal mutex, so they are atomic with
/// respect to each other.
#[derive(Debug, Default)]
pub struct ReviewLedger {
    locks: Mutex<HashMap<SubmissionId, UserId>>,
}

impl ReviewLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `admin` as the reviewer of `submission` iff the
    /// submission is not already claimed. Returns whether the claim was
    /// installed. Does not check whether the admin holds another claim —
    /// that policy lives in the workflow.
    pub fn try_acquire(&self, submission: SubmissionId, admin: UserId) -> bool {
        let mut locks = self.locks.lock();
        if locks.contains_key(&submission) {
            return false;
        }
        locks.insert(submission, admin);
        true
    }

    /// Removes the claim on `submission`. No-op if absent.
    pub fn release(&self, submission: SubmissionId) {
        self.locks.lock().remove(&submission);
    }

    pub fn held_by(&self, submission: SubmissionId) -> Option<UserId> {
        self.locks.lock().get(&submission).copied()
    }

    /// The submission `admin` is currently reviewing, if any. Linear scan;
    /// the ledger stays small (one entry per mid-review admin).
    pub fn active_submission_for(&self, admin: UserId) -> Option<SubmissionId> {
        self.locks
            .lock()
            .iter()
            .find(|(_, holder)| **holder == admin)
            .map(|(submission, _)| *submission)
    }

    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.lock().is_empty()
    }
}
