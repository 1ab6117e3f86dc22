//! # Core Ports
//!
//! Any adapter must implement these traits to be wired into the binary.
//! The storage contracts enforce uniqueness at the storage layer; the
//! notifier delivers intents emitted by the review workflow.

use async_trait::async_trait;

use crate::error::DomainResult;
use crate::models::{AccessLevel, NewSubmission, Notice, Submission, SubmissionId, User, UserId};

/// Data persistence contract for submissions.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Persists a fully-populated variant. Fails with `Validation` if a
    /// required variant field is missing or a document file handle is
    /// already taken.
    async fn create(&self, submission: NewSubmission) -> DomainResult<SubmissionId>;

    async fn get(&self, id: SubmissionId) -> DomainResult<Submission>;

    /// Unconfirmed submissions, oldest first. The ordering defines review
    /// fairness.
    async fn list_unconfirmed(&self) -> DomainResult<Vec<Submission>>;

    /// Atomically sets the confirmation flag, the confirming admin, and
    /// the freshly derived search text. Fails with `PermissionDenied` if
    /// the admin's access level is below the confirm threshold.
    async fn set_confirmed(&self, id: SubmissionId, admin: UserId) -> DomainResult<Submission>;

    /// Removes the submission. The caller is responsible for any
    /// cross-referencing cleanup (bookmarks do not cascade).
    async fn delete(&self, id: SubmissionId) -> DomainResult<()>;

    /// Substring search over the derived search text of confirmed
    /// submissions.
    async fn search_confirmed(&self, query: &str) -> DomainResult<Vec<Submission>>;

    // Bookmarks
    async fn add_bookmark(&self, user: UserId, submission: SubmissionId) -> DomainResult<()>;
    async fn remove_bookmark(&self, user: UserId, submission: SubmissionId) -> DomainResult<()>;
    async fn list_bookmarks(&self, user: UserId) -> DomainResult<Vec<Submission>>;
}

/// Identity and access-level contract.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Returns the user, creating an Ordinary-level row on first contact.
    async fn ensure_user(&self, id: UserId) -> DomainResult<User>;

    async fn get_user(&self, id: UserId) -> DomainResult<User>;

    async fn set_access_level(&self, id: UserId, level: AccessLevel) -> DomainResult<()>;

    /// Stores the conversational position owned by the external session
    /// stepper. The core never interprets it.
    async fn set_step(&self, id: UserId, step: &str) -> DomainResult<()>;
}

/// Delivery contract for owner notices.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, notice: &Notice) -> DomainResult<()>;
}
