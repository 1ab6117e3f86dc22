//! # SQLite storage adapter
//!
//! Implements the data mapping between the SQLite relational model and
//! the `domains` models. Submissions live in a single table with a kind
//! tag and nullable variant columns; the two document file handles carry
//! UNIQUE constraints so duplicates are rejected by the database itself.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::debug;

use domains::{
    AccessLevel, DomainError, DomainResult, Document, Media, NewSubmission, Profile, Submission,
    SubmissionId, SubmissionKind, SubmissionStore, User, UserDirectory, UserId,
};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    user_id      INTEGER PRIMARY KEY,
    access_level TEXT NOT NULL DEFAULT 'ordinary',
    last_step    TEXT NOT NULL DEFAULT '',
    created_at   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS submissions (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    kind          TEXT NOT NULL,
    owner_id      INTEGER NOT NULL,
    admin_id      INTEGER,
    submitted_at  TEXT NOT NULL,
    is_confirmed  INTEGER NOT NULL DEFAULT 0,
    university    TEXT NOT NULL,
    faculty       TEXT NOT NULL,
    description   TEXT NOT NULL,
    search_text   TEXT NOT NULL DEFAULT '',
    -- document
    file_id       TEXT UNIQUE,
    unique_id     TEXT UNIQUE,
    doc_kind      TEXT,
    course        TEXT,
    professor     TEXT,
    writer        TEXT,
    semester_year INTEGER,
    -- profile
    title         TEXT,
    email         TEXT,
    phone_number  TEXT,
    image_link    TEXT,
    image_id      TEXT,
    resume_link   TEXT,
    resume_id     TEXT,
    -- media
    url           TEXT,
    media_kind    TEXT
);

CREATE INDEX IF NOT EXISTS idx_submissions_unconfirmed
    ON submissions (is_confirmed, submitted_at, id);

CREATE TABLE IF NOT EXISTS bookmarks (
    user_id       INTEGER NOT NULL,
    submission_id INTEGER NOT NULL,
    PRIMARY KEY (user_id, submission_id)
);
";

/// SQLite-backed implementation of [`SubmissionStore`] and
/// [`UserDirectory`] sharing one connection pool.
pub struct SqliteSubmissionRepo {
    pool: SqlitePool,
}

impl SqliteSubmissionRepo {
    /// Opens (creating if missing) the database at `url` and ensures the
    /// schema exists.
    pub async fn connect(url: &str) -> DomainResult<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(storage_err)?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(storage_err)?;
        Self::with_pool(pool).await
    }

    /// An isolated in-memory database for tests. Single connection, so
    /// every handle sees the same data.
    pub async fn in_memory() -> DomainResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(storage_err)?;
        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> DomainResult<Self> {
        sqlx::raw_sql(SCHEMA)
            .execute(&pool)
            .await
            .map_err(storage_err)?;
        debug!("sqlite schema ensured");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn storage_err(err: sqlx::Error) -> DomainError {
    DomainError::Storage(err.to_string())
}

/// Maps a failed submission insert; duplicate file handles surface as a
/// validation failure, per the store contract.
fn creation_err(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => DomainError::Validation(
            "a document with this file handle already exists".to_string(),
        ),
        _ => storage_err(err),
    }
}

fn row_to_user(row: &SqliteRow) -> DomainResult<User> {
    Ok(User {
        id: UserId(row.get("user_id")),
        access_level: row.get::<String, _>("access_level").parse()?,
        last_step: row.get("last_step"),
        created_at: row.get("created_at"),
    })
}

fn row_to_submission(row: &SqliteRow) -> DomainResult<Submission> {
    let text = |column: &str| row.get::<Option<String>, _>(column).unwrap_or_default();
    let kind = match row.get::<String, _>("kind").as_str() {
        "document" => SubmissionKind::Document(Document {
            file_id: text("file_id"),
            unique_id: text("unique_id"),
            kind: text("doc_kind").parse()?,
            course: text("course"),
            professor: text("professor"),
            writer: text("writer"),
            semester_year: row.get::<Option<i32>, _>("semester_year").unwrap_or_default(),
        }),
        "profile" => SubmissionKind::Profile(Profile {
            title: text("title"),
            email: text("email"),
            phone_number: text("phone_number"),
            image_link: text("image_link"),
            image_id: text("image_id"),
            resume_link: text("resume_link"),
            resume_id: text("resume_id"),
        }),
        "media" => SubmissionKind::Media(Media {
            url: text("url"),
            kind: text("media_kind"),
            course: text("course"),
            professor: text("professor"),
            semester_year: row.get::<Option<i32>, _>("semester_year").unwrap_or_default(),
        }),
        other => {
            return Err(DomainError::Storage(format!(
                "unknown submission kind '{other}' in row"
            )))
        }
    };

    Ok(Submission {
        id: SubmissionId(row.get("id")),
        owner: UserId(row.get("owner_id")),
        submitted_at: row.get("submitted_at"),
        is_confirmed: row.get("is_confirmed"),
        admin: row.get::<Option<i64>, _>("admin_id").map(UserId),
        university: row.get("university"),
        faculty: row.get("faculty"),
        description: row.get("description"),
        search_text: row.get("search_text"),
        kind,
    })
}

#[async_trait]
impl SubmissionStore for SqliteSubmissionRepo {
    /// Validates, then inserts the owner row (first contact) and the
    /// submission in one transaction, so a rejected insert leaves no
    /// trace.
    async fn create(&self, submission: NewSubmission) -> DomainResult<SubmissionId> {
        submission.validate()?;
        let now = Utc::now();
        let mut tx = self.pool.begin().await.map_err(storage_err)?;

        sqlx::query(
            "INSERT OR IGNORE INTO users (user_id, access_level, last_step, created_at) \
             VALUES (?, 'ordinary', '', ?)",
        )
        .bind(submission.owner.0)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(storage_err)?;

        let inserted = match &submission.kind {
            SubmissionKind::Document(d) => {
                sqlx::query(
                    "INSERT INTO submissions \
                     (kind, owner_id, submitted_at, university, faculty, description, \
                      file_id, unique_id, doc_kind, course, professor, writer, semester_year) \
                     VALUES ('document', ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                )
                .bind(submission.owner.0)
                .bind(now)
                .bind(&submission.university)
                .bind(&submission.faculty)
                .bind(&submission.description)
                .bind(&d.file_id)
                .bind(&d.unique_id)
                .bind(d.kind.as_str())
                .bind(&d.course)
                .bind(&d.professor)
                .bind(&d.writer)
                .bind(d.semester_year)
                .execute(&mut *tx)
                .await
            }
            SubmissionKind::Profile(p) => {
                sqlx::query(
                    "INSERT INTO submissions \
                     (kind, owner_id, submitted_at, university, faculty, description, \
                      title, email, phone_number, image_link, image_id, resume_link, resume_id) \
                     VALUES ('profile', ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                )
                .bind(submission.owner.0)
                .bind(now)
                .bind(&submission.university)
                .bind(&submission.faculty)
                .bind(&submission.description)
                .bind(&p.title)
                .bind(&p.email)
                .bind(&p.phone_number)
                .bind(&p.image_link)
                .bind(&p.image_id)
                .bind(&p.resume_link)
                .bind(&p.resume_id)
                .execute(&mut *tx)
                .await
            }
            SubmissionKind::Media(m) => {
                sqlx::query(
                    "INSERT INTO submissions \
                     (kind, owner_id, submitted_at, university, faculty, description, \
                      url, media_kind, course, professor, semester_year) \
                     VALUES ('media', ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                )
                .bind(submission.owner.0)
                .bind(now)
                .bind(&submission.university)
                .bind(&submission.faculty)
                .bind(&submission.description)
                .bind(&m.url)
                .bind(&m.kind)
                .bind(&m.course)
                .bind(&m.professor)
                .bind(m.semester_year)
                .execute(&mut *tx)
                .await
            }
        }
        .map_err(creation_err)?;

        tx.commit().await.map_err(storage_err)?;
        Ok(SubmissionId(inserted.last_insert_rowid()))
    }

    async fn get(&self, id: SubmissionId) -> DomainResult<Submission> {
        let row = sqlx::query("SELECT * FROM submissions WHERE id = ?")
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_err)?
            .ok_or(DomainError::NotFound("submission", id.0))?;
        row_to_submission(&row)
    }

    async fn list_unconfirmed(&self) -> DomainResult<Vec<Submission>> {
        let rows = sqlx::query(
            "SELECT * FROM submissions WHERE is_confirmed = 0 ORDER BY submitted_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err)?;
        rows.iter().map(row_to_submission).collect()
    }

    /// Single transaction: permission check, flag flip, admin reference,
    /// and the freshly derived search text all land together or not at
    /// all.
    async fn set_confirmed(&self, id: SubmissionId, admin: UserId) -> DomainResult<Submission> {
        let mut tx = self.pool.begin().await.map_err(storage_err)?;

        let admin_row = sqlx::query("SELECT access_level FROM users WHERE user_id = ?")
            .bind(admin.0)
            .fetch_optional(&mut *tx)
            .await
            .map_err(storage_err)?
            .ok_or(DomainError::NotFound("user", admin.0))?;
        let level: AccessLevel = admin_row.get::<String, _>("access_level").parse()?;
        if !level.can_confirm() {
            return Err(DomainError::PermissionDenied(format!(
                "user {admin} is below the confirm threshold"
            )));
        }

        let row = sqlx::query("SELECT * FROM submissions WHERE id = ?")
            .bind(id.0)
            .fetch_optional(&mut *tx)
            .await
            .map_err(storage_err)?
            .ok_or(DomainError::NotFound("submission", id.0))?;
        let mut submission = row_to_submission(&row)?;

        submission.is_confirmed = true;
        submission.admin = Some(admin);
        submission.update_search_text();

        sqlx::query("UPDATE submissions SET is_confirmed = 1, admin_id = ?, search_text = ? WHERE id = ?")
            .bind(admin.0)
            .bind(&submission.search_text)
            .bind(id.0)
            .execute(&mut *tx)
            .await
            .map_err(storage_err)?;

        tx.commit().await.map_err(storage_err)?;
        Ok(submission)
    }

    /// Removes the row. Bookmarks pointing at it are left behind; reads
    /// drop them on the JOIN.
    async fn delete(&self, id: SubmissionId) -> DomainResult<()> {
        let done = sqlx::query("DELETE FROM submissions WHERE id = ?")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;
        if done.rows_affected() == 0 {
            return Err(DomainError::NotFound("submission", id.0));
        }
        Ok(())
    }

    async fn search_confirmed(&self, query: &str) -> DomainResult<Vec<Submission>> {
        let rows = sqlx::query(
            "SELECT * FROM submissions WHERE is_confirmed = 1 AND search_text LIKE ? ORDER BY id ASC",
        )
        .bind(format!("%{query}%"))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err)?;
        rows.iter().map(row_to_submission).collect()
    }

    async fn add_bookmark(&self, user: UserId, submission: SubmissionId) -> DomainResult<()> {
        // Reject bookmarks on ids that never existed; ones that dangle
        // after a delete are tolerated on read instead.
        self.get(submission).await?;
        sqlx::query("INSERT OR IGNORE INTO bookmarks (user_id, submission_id) VALUES (?, ?)")
            .bind(user.0)
            .bind(submission.0)
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;
        Ok(())
    }

    async fn remove_bookmark(&self, user: UserId, submission: SubmissionId) -> DomainResult<()> {
        sqlx::query("DELETE FROM bookmarks WHERE user_id = ? AND submission_id = ?")
            .bind(user.0)
            .bind(submission.0)
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;
        Ok(())
    }

    async fn list_bookmarks(&self, user: UserId) -> DomainResult<Vec<Submission>> {
        let rows = sqlx::query(
            "SELECT s.* FROM submissions s \
             JOIN bookmarks b ON b.submission_id = s.id \
             WHERE b.user_id = ? ORDER BY s.id ASC",
        )
        .bind(user.0)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err)?;
        rows.iter().map(row_to_submission).collect()
    }
}

#[async_trait]
impl UserDirectory for SqliteSubmissionRepo {
    async fn ensure_user(&self, id: UserId) -> DomainResult<User> {
        sqlx::query(
            "INSERT OR IGNORE INTO users (user_id, access_level, last_step, created_at) \
             VALUES (?, 'ordinary', '', ?)",
        )
        .bind(id.0)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(storage_err)?;
        self.get_user(id).await
    }

    async fn get_user(&self, id: UserId) -> DomainResult<User> {
        let row = sqlx::query("SELECT * FROM users WHERE user_id = ?")
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_err)?
            .ok_or(DomainError::NotFound("user", id.0))?;
        row_to_user(&row)
    }

    async fn set_access_level(&self, id: UserId, level: AccessLevel) -> DomainResult<()> {
        let done = sqlx::query("UPDATE users SET access_level = ? WHERE user_id = ?")
            .bind(level.as_str())
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;
        if done.rows_affected() == 0 {
            return Err(DomainError::NotFound("user", id.0));
        }
        Ok(())
    }

    async fn set_step(&self, id: UserId, step: &str) -> DomainResult<()> {
        let done = sqlx::query("UPDATE users SET last_step = ? WHERE user_id = ?")
            .bind(step)
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;
        if done.rows_affected() == 0 {
            return Err(DomainError::NotFound("user", id.0));
        }
        Ok(())
    }
}
