//! Shared fixtures: a seeded in-memory repo and submission builders.

#![allow(dead_code)]

use std::sync::Arc;

use domains::{
    AccessLevel, DocKind, Document, Media, NewSubmission, Profile, SubmissionKind,
    SubmissionStore, UserDirectory, UserId, UNSPECIFIED,
};
use services::{ReviewLedger, ReviewWorkflow};
use storage_adapters::SqliteSubmissionRepo;

pub const OWNER: UserId = UserId(1);
pub const ADMIN_X: UserId = UserId(10);
pub const ADMIN_Y: UserId = UserId(11);
pub const EDITOR: UserId = UserId(20);
pub const STUDENT: UserId = UserId(100);

/// In-memory database with the staff hierarchy already in place.
pub async fn seeded_repo() -> Arc<SqliteSubmissionRepo> {
    let repo = Arc::new(SqliteSubmissionRepo::in_memory().await.unwrap());
    for (user, level) in [
        (OWNER, AccessLevel::Owner),
        (ADMIN_X, AccessLevel::Admin),
        (ADMIN_Y, AccessLevel::Admin),
        (EDITOR, AccessLevel::Editor),
        (STUDENT, AccessLevel::Ordinary),
    ] {
        repo.ensure_user(user).await.unwrap();
        repo.set_access_level(user, level).await.unwrap();
    }
    repo
}

pub fn review_stack(repo: Arc<SqliteSubmissionRepo>) -> (ReviewWorkflow, Arc<ReviewLedger>) {
    let ledger = Arc::new(ReviewLedger::new());
    let store: Arc<dyn SubmissionStore> = repo.clone();
    let users: Arc<dyn UserDirectory> = repo;
    (
        ReviewWorkflow::new(store, users, Arc::clone(&ledger)),
        ledger,
    )
}

pub fn document(handle: &str, course: &str) -> NewSubmission {
    NewSubmission::new(
        STUDENT,
        SubmissionKind::Document(Document {
            file_id: format!("FILE-{handle}"),
            unique_id: format!("UNIQ-{handle}"),
            kind: DocKind::Pamphlet,
            course: course.to_string(),
            professor: UNSPECIFIED.to_string(),
            writer: UNSPECIFIED.to_string(),
            semester_year: 0,
        }),
    )
}

pub fn profile(title: &str) -> NewSubmission {
    NewSubmission::new(
        STUDENT,
        SubmissionKind::Profile(Profile {
            title: title.to_string(),
            email: String::new(),
            phone_number: String::new(),
            image_link: String::new(),
            image_id: String::new(),
            resume_link: String::new(),
            resume_id: String::new(),
        }),
    )
}

pub fn media(course: &str, professor: &str) -> NewSubmission {
    NewSubmission::new(
        STUDENT,
        SubmissionKind::Media(Media {
            url: format!("https://example.com/{course}"),
            kind: "فیلم".to_string(),
            course: course.to_string(),
            professor: professor.to_string(),
            semester_year: 0,
        }),
    )
}
