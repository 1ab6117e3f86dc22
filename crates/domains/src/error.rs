//! # DomainError
//!
//! Centralized error handling for the Uniboard core. Permission and state
//! violations are typed values, not panics; the workflow propagates them
//! unchanged to its callers.

use thiserror::Error;

use crate::models::{SubmissionId, UserId};

/// The primary error type for all domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed or missing required submission fields, including
    /// duplicate document file handles. Nothing is persisted.
    #[error("validation error: {0}")]
    Validation(String),

    /// Unknown submission or user id.
    #[error("{0} not found with id {1}")]
    NotFound(&'static str, i64),

    /// Access level below the threshold for a privileged action.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// An admin acted on a review lock they do not hold.
    #[error("submission {0} is not under review by user {1}")]
    NotReviewOwner(SubmissionId, UserId),

    /// Reject issued by an admin with no active review.
    #[error("user {0} has no active review")]
    NoActiveReview(UserId),

    /// Infrastructure failure in a storage adapter.
    #[error("storage error: {0}")]
    Storage(String),
}

/// A specialized Result type for Uniboard domain logic.
pub type DomainResult<T> = std::result::Result<T, DomainError>;
