//! Append-only SQLite storage for brand mentions.
//!
//! One file, one `mentions` table. Every public operation opens its own
//! connection and closes it before returning; no pool is kept between calls.

mod mentions;

pub use mentions::MentionStore;

use thiserror::Error;

/// Name of the single table backing the store.
pub const TABLE_NAME: &str = "mentions";

#[derive(Debug, Error)]
pub enum DbError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error("failed to create database directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("row {rowid} is malformed: {reason}")]
    InvalidRow { rowid: i64, reason: String },
}
