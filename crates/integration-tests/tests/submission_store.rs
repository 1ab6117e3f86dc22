//! SQLite adapter contract tests: validation, uniqueness, confirmation
//! atomics, bookmarks, and the user directory.

mod common;

use common::*;
use domains::{
    AccessLevel, DomainError, Document, DocKind, NewSubmission, SubmissionId, SubmissionKind,
    SubmissionStore, UserDirectory, UserId, UNSPECIFIED,
};

#[tokio::test]
async fn create_rejects_missing_required_fields() {
    let repo = seeded_repo().await;
    let missing_course = NewSubmission::new(
        STUDENT,
        SubmissionKind::Document(Document {
            file_id: "FILE-x".to_string(),
            unique_id: "UNIQ-x".to_string(),
            kind: DocKind::Book,
            course: String::new(),
            professor: UNSPECIFIED.to_string(),
            writer: UNSPECIFIED.to_string(),
            semester_year: 0,
        }),
    );

    let err = repo.create(missing_course).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
    assert!(repo.list_unconfirmed().await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_file_handle_is_a_validation_error() {
    let repo = seeded_repo().await;
    repo.create(document("a", "ریاضی ۱")).await.unwrap();

    let mut dup = document("z", "فیزیک ۲");
    if let SubmissionKind::Document(d) = &mut dup.kind {
        d.file_id = "FILE-a".to_string(); // already taken
    }
    let err = repo.create(dup).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
    // Nothing partially persisted.
    assert_eq!(repo.list_unconfirmed().await.unwrap().len(), 1);
}

#[tokio::test]
async fn set_confirmed_requires_confirm_rank() {
    let repo = seeded_repo().await;
    let a = repo.create(document("a", "ریاضی ۱")).await.unwrap();

    let err = repo.set_confirmed(a, EDITOR).await.unwrap_err();
    assert!(matches!(err, DomainError::PermissionDenied(_)));
    assert!(!repo.get(a).await.unwrap().is_confirmed);

    let err = repo.set_confirmed(a, UserId(4242)).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound("user", 4242)));
}

#[tokio::test]
async fn set_confirmed_on_unknown_submission_fails() {
    let repo = seeded_repo().await;
    let err = repo
        .set_confirmed(SubmissionId(999), ADMIN_X)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound("submission", 999)));
}

#[tokio::test]
async fn confirmation_stores_derived_search_text() {
    let repo = seeded_repo().await;
    let mut new = document("a", "مدار منطقی");
    if let SubmissionKind::Document(d) = &mut new.kind {
        d.writer = "نویسنده‌ای".to_string();
    }
    let a = repo.create(new).await.unwrap();

    let confirmed = repo.set_confirmed(a, ADMIN_X).await.unwrap();
    // Professor, year, and university are unspecified, so only the
    // writer clause is appended.
    assert_eq!(
        confirmed.search_text,
        "جزوه درس مدار منطقی نویسنده نویسنده‌ای"
    );
    assert_eq!(repo.get(a).await.unwrap().search_text, confirmed.search_text);
}

#[tokio::test]
async fn delete_unknown_submission_fails() {
    let repo = seeded_repo().await;
    let a = repo.create(document("a", "ریاضی ۱")).await.unwrap();

    repo.delete(a).await.unwrap();
    let err = repo.delete(a).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound("submission", _)));
}

#[tokio::test]
async fn search_only_covers_confirmed_rows() {
    let repo = seeded_repo().await;
    let a = repo.create(document("a", "ریاضی ۱")).await.unwrap();
    repo.create(document("b", "ریاضی ۲")).await.unwrap();
    repo.set_confirmed(a, ADMIN_X).await.unwrap();

    let hits = repo.search_confirmed("ریاضی").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, a);
    assert!(repo.search_confirmed("تاریخ").await.unwrap().is_empty());
}

#[tokio::test]
async fn bookmarks_do_not_cascade_but_reads_drop_dangling_rows() {
    let repo = seeded_repo().await;
    let a = repo.create(document("a", "ریاضی ۱")).await.unwrap();
    let b = repo.create(document("b", "فیزیک ۲")).await.unwrap();

    repo.add_bookmark(STUDENT, a).await.unwrap();
    repo.add_bookmark(STUDENT, a).await.unwrap(); // idempotent
    repo.add_bookmark(STUDENT, b).await.unwrap();
    assert_eq!(repo.list_bookmarks(STUDENT).await.unwrap().len(), 2);

    // Deleting a submission leaves its bookmark row behind; the read
    // filters it out.
    repo.delete(a).await.unwrap();
    let remaining = repo.list_bookmarks(STUDENT).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, b);

    repo.remove_bookmark(STUDENT, b).await.unwrap();
    repo.remove_bookmark(STUDENT, b).await.unwrap(); // idempotent
    assert!(repo.list_bookmarks(STUDENT).await.unwrap().is_empty());
}

#[tokio::test]
async fn bookmarking_an_unknown_submission_fails() {
    let repo = seeded_repo().await;
    let err = repo
        .add_bookmark(STUDENT, SubmissionId(999))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound("submission", 999)));
}

#[tokio::test]
async fn first_contact_creates_an_ordinary_user() {
    let repo = seeded_repo().await;
    let newcomer = repo.ensure_user(UserId(7777)).await.unwrap();
    assert_eq!(newcomer.access_level, AccessLevel::Ordinary);

    // ensure_user never downgrades an existing row.
    repo.set_access_level(UserId(7777), AccessLevel::Editor)
        .await
        .unwrap();
    let again = repo.ensure_user(UserId(7777)).await.unwrap();
    assert_eq!(again.access_level, AccessLevel::Editor);
}

#[tokio::test]
async fn session_step_is_stored_verbatim() {
    let repo = seeded_repo().await;
    repo.set_step(STUDENT, "admin_panel").await.unwrap();
    assert_eq!(repo.get_user(STUDENT).await.unwrap().last_step, "admin_panel");

    let err = repo.set_step(UserId(4242), "start").await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound("user", 4242)));
}

#[tokio::test]
async fn submission_ids_increase_with_creation_order() {
    let repo = seeded_repo().await;
    let a = repo.create(document("a", "ریاضی ۱")).await.unwrap();
    let b = repo.create(profile("دکتر محمدی")).await.unwrap();
    let c = repo.create(media("فیزیک ۲", "دکتر رضایی")).await.unwrap();
    assert!(a < b && b < c);

    let queue = repo.list_unconfirmed().await.unwrap();
    let ids: Vec<_> = queue.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![a, b, c]);
}
