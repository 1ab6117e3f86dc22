//! Seeds the configured database with a demo staff hierarchy and a few
//! pending submissions, so the review console has something to moderate.

use anyhow::{Context, Result};

use configs::Settings;
use domains::{
    AccessLevel, DocKind, Document, Media, NewSubmission, Profile, SubmissionKind,
    SubmissionStore, UserDirectory, UserId,
};
use storage_adapters::SqliteSubmissionRepo;

const OWNER: UserId = UserId(1);
const ADMIN: UserId = UserId(10);
const EDITOR: UserId = UserId(20);
const STUDENT: UserId = UserId(100);

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load().context("loading settings")?;
    let repo = SqliteSubmissionRepo::connect(&settings.database_url)
        .await
        .context("opening the submission database")?;

    for (user, level) in [
        (OWNER, AccessLevel::Owner),
        (ADMIN, AccessLevel::Admin),
        (EDITOR, AccessLevel::Editor),
        (STUDENT, AccessLevel::Ordinary),
    ] {
        repo.ensure_user(user).await?;
        repo.set_access_level(user, level).await?;
    }

    let mut document = NewSubmission::new(
        STUDENT,
        SubmissionKind::Document(Document {
            file_id: "BQACAgQAAxkBAAIB".to_string(),
            unique_id: "AgAD9w4AAmxqcVE".to_string(),
            kind: DocKind::Pamphlet,
            course: "ریاضی ۱".to_string(),
            professor: "دکتر محمدی".to_string(),
            writer: domains::UNSPECIFIED.to_string(),
            semester_year: 1402,
        }),
    );
    document.university = "صنعتی شریف".to_string();
    document.faculty = "ریاضی".to_string();

    let profile = NewSubmission::new(
        STUDENT,
        SubmissionKind::Profile(Profile {
            title: "دکتر محمدی".to_string(),
            email: "mohammadi@example.ac.ir".to_string(),
            phone_number: String::new(),
            image_link: String::new(),
            image_id: String::new(),
            resume_link: String::new(),
            resume_id: String::new(),
        }),
    );

    let media = NewSubmission::new(
        STUDENT,
        SubmissionKind::Media(Media {
            url: "https://example.com/physics-2/lecture-01".to_string(),
            kind: "فیلم".to_string(),
            course: "فیزیک ۲".to_string(),
            professor: "دکتر رضایی".to_string(),
            semester_year: 0,
        }),
    );

    let mut created = 0;
    for submission in [document, profile, media] {
        match repo.create(submission).await {
            Ok(id) => {
                created += 1;
                println!("seeded submission #{id}");
            }
            // Re-running the seed hits the unique file handles.
            Err(domains::DomainError::Validation(msg)) => {
                println!("skipped: {msg}");
            }
            Err(err) => return Err(err.into()),
        }
    }

    println!("done — {created} submissions pending review");
    Ok(())
}
