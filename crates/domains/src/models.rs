//! # Domain Models
//!
//! These structs represent the core entities of Uniboard: users with an
//! ordered access level, and submissions in their three concrete shapes
//! (document, profile, media link). Submission ids are auto-assigned and
//! monotonically increasing, so they double as the chronological tiebreaker
//! for the review queue.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::search;

/// Sentinel value for free-text fields the submitter left blank.
pub const UNSPECIFIED: &str = "نامشخص";

/// Default description attached to a submission with no description.
pub const DEFAULT_DESCRIPTION: &str = "توضیحاتی برای این فایل ثبت نشده است.";

/// Opaque identity of a user (assigned by the chat transport).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a submission. Auto-assigned, monotonically increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubmissionId(pub i64);

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered access levels. Confirming a submission requires a rank of at
/// least [`AccessLevel::CONFIRM_RANK`], i.e. strictly above Editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Ordinary,
    Contributor,
    Editor,
    Admin,
    Owner,
}

impl AccessLevel {
    /// Minimum rank allowed to confirm or reject submissions.
    pub const CONFIRM_RANK: u8 = 3;

    pub fn rank(self) -> u8 {
        match self {
            AccessLevel::Ordinary => 0,
            AccessLevel::Contributor => 1,
            AccessLevel::Editor => 2,
            AccessLevel::Admin => 3,
            AccessLevel::Owner => 4,
        }
    }

    pub fn can_confirm(self) -> bool {
        self.rank() >= Self::CONFIRM_RANK
    }

    /// Stable lowercase name used by the storage layer.
    pub fn as_str(self) -> &'static str {
        match self {
            AccessLevel::Ordinary => "ordinary",
            AccessLevel::Contributor => "contributor",
            AccessLevel::Editor => "editor",
            AccessLevel::Admin => "admin",
            AccessLevel::Owner => "owner",
        }
    }
}

impl FromStr for AccessLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ordinary" => Ok(AccessLevel::Ordinary),
            "contributor" => Ok(AccessLevel::Contributor),
            "editor" => Ok(AccessLevel::Editor),
            "admin" => Ok(AccessLevel::Admin),
            "owner" => Ok(AccessLevel::Owner),
            other => Err(DomainError::Validation(format!(
                "unknown access level '{other}'"
            ))),
        }
    }
}

/// A user of the archive. Created on first contact; never physically
/// deleted. `last_step` belongs to the external session stepper — this
/// core only stores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub access_level: AccessLevel,
    pub last_step: String,
    pub created_at: DateTime<Utc>,
}

/// Typed category of an uploaded document, displayed with a Persian label
/// that leads the derived search text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocKind {
    Pamphlet,
    Book,
    Slide,
    SampleQuestions,
    Exercise,
}

impl DocKind {
    pub fn label(self) -> &'static str {
        match self {
            DocKind::Pamphlet => "جزوه",
            DocKind::Book => "کتاب",
            DocKind::Slide => "اسلاید",
            DocKind::SampleQuestions => "نمونه سوال",
            DocKind::Exercise => "تمرین",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DocKind::Pamphlet => "pamphlet",
            DocKind::Book => "book",
            DocKind::Slide => "slide",
            DocKind::SampleQuestions => "sample_questions",
            DocKind::Exercise => "exercise",
        }
    }
}

impl FromStr for DocKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pamphlet" => Ok(DocKind::Pamphlet),
            "book" => Ok(DocKind::Book),
            "slide" => Ok(DocKind::Slide),
            "sample_questions" => Ok(DocKind::SampleQuestions),
            "exercise" => Ok(DocKind::Exercise),
            other => Err(DomainError::Validation(format!(
                "unknown document kind '{other}'"
            ))),
        }
    }
}

/// Variant payload of a [`Submission`]. Exactly one per submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SubmissionKind {
    Document(Document),
    Profile(Profile),
    Media(Media),
}

impl SubmissionKind {
    /// Stable tag used by the storage layer.
    pub fn tag(&self) -> &'static str {
        match self {
            SubmissionKind::Document(_) => "document",
            SubmissionKind::Profile(_) => "profile",
            SubmissionKind::Media(_) => "media",
        }
    }
}

/// An uploaded course document. `file_id` and `unique_id` are the two
/// transport-level file handles; both are required and unique across all
/// documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub file_id: String,
    pub unique_id: String,
    pub kind: DocKind,
    pub course: String,
    pub professor: String,
    pub writer: String,
    /// 0 means unset.
    pub semester_year: i32,
}

/// A personal/professor profile entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub title: String,
    pub email: String,
    pub phone_number: String,
    pub image_link: String,
    pub image_id: String,
    pub resume_link: String,
    pub resume_id: String,
}

/// An external media link (recorded lectures and the like).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    pub url: String,
    /// Free-form label, e.g. "فیلم".
    pub kind: String,
    pub course: String,
    pub professor: String,
    pub semester_year: i32,
}

/// A user-contributed item awaiting or having received moderation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: SubmissionId,
    pub owner: UserId,
    pub submitted_at: DateTime<Utc>,
    pub is_confirmed: bool,
    /// The admin who confirmed this submission. Set only on confirm.
    pub admin: Option<UserId>,
    pub university: String,
    pub faculty: String,
    pub description: String,
    /// Derived display/search string. Recomputed right before the
    /// submission transitions to confirmed.
    pub search_text: String,
    pub kind: SubmissionKind,
}

impl Submission {
    pub fn update_search_text(&mut self) {
        self.search_text = search::derive(self);
    }
}

impl fmt::Display for Submission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            SubmissionKind::Document(d) => write!(
                f,
                "{} «{}» (#{} از {})",
                d.kind.label(),
                d.course,
                self.id,
                self.owner
            ),
            SubmissionKind::Profile(p) => {
                write!(f, "اطلاعات «{}» (#{} از {})", p.title, self.id, self.owner)
            }
            SubmissionKind::Media(m) => {
                write!(f, "فیلم «{}» (#{} از {})", m.course, self.id, self.owner)
            }
        }
    }
}

/// Payload for creating a submission. The id, timestamp, and confirmation
/// state are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub owner: UserId,
    pub university: String,
    pub faculty: String,
    pub description: String,
    pub kind: SubmissionKind,
}

impl NewSubmission {
    /// Starts a submission with the sentinel defaults for the shared
    /// free-text fields.
    pub fn new(owner: UserId, kind: SubmissionKind) -> Self {
        Self {
            owner,
            university: UNSPECIFIED.to_string(),
            faculty: UNSPECIFIED.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            kind,
        }
    }

    /// Checks the variant-specific required fields. Runs before anything
    /// is persisted.
    pub fn validate(&self) -> DomainResult<()> {
        let missing = |field: &str| {
            Err(DomainError::Validation(format!(
                "{} requires a non-empty {field}",
                self.kind.tag()
            )))
        };
        match &self.kind {
            SubmissionKind::Document(d) => {
                if d.file_id.is_empty() {
                    return missing("file_id");
                }
                if d.unique_id.is_empty() {
                    return missing("unique_id");
                }
                if d.course.is_empty() {
                    return missing("course");
                }
            }
            SubmissionKind::Profile(p) => {
                if p.title.is_empty() {
                    return missing("title");
                }
            }
            SubmissionKind::Media(m) => {
                if m.url.is_empty() {
                    return missing("url");
                }
                if m.course.is_empty() {
                    return missing("course");
                }
                if m.professor.is_empty() {
                    return missing("professor");
                }
            }
        }
        Ok(())
    }
}

/// Side-effect intent emitted by the review workflow. Delivery is a
/// collaborator's job; the workflow never performs I/O itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub recipient: UserId,
    pub event: NoticeEvent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NoticeEvent {
    Confirmed {
        submission: Submission,
    },
    Rejected {
        submission: Submission,
        /// Passed through to the owner, never stored.
        reason: String,
    },
}
