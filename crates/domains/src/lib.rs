//! uniboard/crates/domains/src/lib.rs
//!
//! The central domain logic and interface definitions for Uniboard:
//! models, ports, the error taxonomy, and search-text derivation.

pub mod error;
pub mod models;
pub mod ports;
pub mod search;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use ports::*;

#[cfg(test)]
mod tests {
    use super::models::*;

    fn document() -> Document {
        Document {
            file_id: "FILE-1".to_string(),
            unique_id: "UNIQ-1".to_string(),
            kind: DocKind::Pamphlet,
            course: "ریاضی ۱".to_string(),
            professor: UNSPECIFIED.to_string(),
            writer: UNSPECIFIED.to_string(),
            semester_year: 0,
        }
    }

    #[test]
    fn confirm_threshold_sits_above_editor() {
        assert!(!AccessLevel::Editor.can_confirm());
        assert!(AccessLevel::Admin.can_confirm());
        assert!(AccessLevel::Owner.can_confirm());
        assert!(AccessLevel::Editor.rank() < AccessLevel::CONFIRM_RANK);
    }

    #[test]
    fn new_submission_defaults_to_sentinels() {
        let new = NewSubmission::new(UserId(7), SubmissionKind::Document(document()));
        assert_eq!(new.university, UNSPECIFIED);
        assert_eq!(new.faculty, UNSPECIFIED);
        assert_eq!(new.description, DEFAULT_DESCRIPTION);
        assert!(new.validate().is_ok());
    }

    #[test]
    fn document_requires_file_handles_and_course() {
        let mut doc = document();
        doc.unique_id.clear();
        let new = NewSubmission::new(UserId(7), SubmissionKind::Document(doc));
        assert!(matches!(
            new.validate(),
            Err(crate::error::DomainError::Validation(_))
        ));
    }

    #[test]
    fn media_requires_url_course_professor() {
        let media = Media {
            url: "https://example.com/lecture".to_string(),
            kind: String::new(),
            course: "فیزیک ۲".to_string(),
            professor: String::new(),
            semester_year: 0,
        };
        let new = NewSubmission::new(UserId(7), SubmissionKind::Media(media));
        assert!(new.validate().is_err());
    }

    #[test]
    fn access_level_round_trips_through_storage_name() {
        for level in [
            AccessLevel::Ordinary,
            AccessLevel::Contributor,
            AccessLevel::Editor,
            AccessLevel::Admin,
            AccessLevel::Owner,
        ] {
            assert_eq!(level.as_str().parse::<AccessLevel>().unwrap(), level);
        }
    }
}
