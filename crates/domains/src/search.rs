//! Search-text derivation.
//!
//! Pure, per-variant recomputation of the denormalized display string a
//! confirmed submission exposes to search. Clause order is fixed; a field
//! holding the unspecified sentinel (or a zero year) contributes no clause.
//! Runs exactly once, as the final step before a submission is confirmed.

use crate::models::{Submission, SubmissionKind, UNSPECIFIED};

/// Derives the search text for the submission's current field values.
pub fn derive(submission: &Submission) -> String {
    match &submission.kind {
        SubmissionKind::Document(d) => {
            let mut text = format!("{} درس {}", d.kind.label(), d.course);
            if d.professor != UNSPECIFIED {
                text.push_str(&format!(" استاد {}", d.professor));
            }
            if d.writer != UNSPECIFIED {
                text.push_str(&format!(" نویسنده {}", d.writer));
            }
            if d.semester_year != 0 {
                text.push_str(&format!(" سال {}", d.semester_year));
            }
            if submission.university != UNSPECIFIED {
                text.push_str(&format!(" دانشگاه {}", submission.university));
            }
            text
        }
        SubmissionKind::Profile(p) => {
            // The base string already names the faculty; a specified
            // faculty appears a second time as an appended clause.
            let mut text = format!("اطلاعات {} دانشکده {}", p.title, submission.faculty);
            if submission.faculty != UNSPECIFIED {
                text.push_str(&format!(" دانشکده {}", submission.faculty));
            }
            if submission.university != UNSPECIFIED {
                text.push_str(&format!(" دانشگاه {}", submission.university));
            }
            text
        }
        SubmissionKind::Media(m) => {
            let mut text = format!("فیلم درس {} استاد {}", m.course, m.professor);
            if submission.faculty != UNSPECIFIED {
                text.push_str(&format!(" دانشکده {}", submission.faculty));
            }
            if m.semester_year != 0 {
                text.push_str(&format!(" سال {}", m.semester_year));
            }
            if submission.university != UNSPECIFIED {
                text.push_str(&format!(" دانشگاه {}", submission.university));
            }
            text
        }
    }
}
