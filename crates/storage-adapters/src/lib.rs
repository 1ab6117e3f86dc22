//! uniboard/crates/storage-adapters/src/lib.rs
//!
//! Storage backends implementing the `domains` ports. Each backend sits
//! behind a feature so binaries compile only what they wire up.

#[cfg(feature = "db-sqlite")]
pub mod sqlite;

#[cfg(feature = "db-sqlite")]
pub use sqlite::SqliteSubmissionRepo;
