//! Operations on the `mentions` table.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use brandpulse_core::{
    epoch_seconds, from_epoch_seconds, Mention, Outcome, SentimentLabel, MISSING_AUTHOR,
};
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::Connection;

use crate::DbError;

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS mentions (\
     id TEXT, \
     brand TEXT, \
     text TEXT, \
     subreddit TEXT, \
     author TEXT, \
     created_utc REAL, \
     sentiment_score REAL, \
     sentiment_label TEXT, \
     url TEXT)";

const INSERT_SQL: &str = "INSERT INTO mentions \
     (id, brand, text, subreddit, author, created_utc, sentiment_score, sentiment_label, url) \
     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)";

const SELECT_ALL_SQL: &str = "SELECT rowid, id, brand, text, subreddit, author, \
     CAST(created_utc AS REAL) AS created_utc, \
     CAST(sentiment_score AS REAL) AS sentiment_score, \
     sentiment_label, url \
     FROM mentions \
     ORDER BY rowid";

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A raw row from the `mentions` table. Columns are nullable on disk.
#[derive(Debug, sqlx::FromRow)]
struct MentionRow {
    rowid: i64,
    id: Option<String>,
    brand: Option<String>,
    text: Option<String>,
    subreddit: Option<String>,
    author: Option<String>,
    created_utc: Option<f64>,
    sentiment_score: Option<f64>,
    sentiment_label: Option<String>,
    url: Option<String>,
}

/// Rows need an id and a usable timestamp. Other NULL text columns load as
/// empty strings, a NULL author as [`MISSING_AUTHOR`], and a missing or
/// unreadable label is derived from the score.
impl TryFrom<MentionRow> for Mention {
    type Error = DbError;

    fn try_from(row: MentionRow) -> Result<Self, Self::Error> {
        let rowid = row.rowid;
        let id = row.id.ok_or_else(|| DbError::InvalidRow {
            rowid,
            reason: "column 'id' is NULL".to_string(),
        })?;

        let created_utc = row
            .created_utc
            .and_then(from_epoch_seconds)
            .ok_or_else(|| DbError::InvalidRow {
                rowid,
                reason: "created_utc is NULL or out of range".to_string(),
            })?;

        let (sentiment_score, sentiment_label) = match row.sentiment_score {
            Some(score) => {
                let label = row
                    .sentiment_label
                    .and_then(|l| l.parse::<SentimentLabel>().ok())
                    .unwrap_or_else(|| SentimentLabel::from_score(score));
                (score, label)
            }
            None => (0.0, SentimentLabel::from_score(0.0)),
        };

        Ok(Mention {
            id,
            brand: row.brand.unwrap_or_default(),
            text: row.text.unwrap_or_default(),
            subreddit: row.subreddit.unwrap_or_default(),
            author: row.author.unwrap_or_else(|| MISSING_AUTHOR.to_string()),
            created_utc,
            sentiment_score,
            sentiment_label,
            url: row.url.unwrap_or_default(),
        })
    }
}

// ---------------------------------------------------------------------------
// Store handle
// ---------------------------------------------------------------------------

/// Handle to the single-file mention store.
#[derive(Debug, Clone)]
pub struct MentionStore {
    path: PathBuf,
}

impl MentionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every stored mention in insertion order.
    ///
    /// A missing file or missing table is [`Outcome::Empty`], not an error.
    /// Any other failure is logged and returned as [`Outcome::Failed`].
    pub async fn load_all(&self) -> Outcome<Vec<Mention>> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "database file does not exist yet");
            return Outcome::Empty;
        }

        match self.try_load_all().await {
            Ok(Some(rows)) if !rows.is_empty() => Outcome::Success(rows),
            Ok(_) => Outcome::Empty,
            Err(e) => {
                tracing::error!(path = %self.path.display(), error = %e, "failed to load mentions");
                Outcome::Failed(e.to_string())
            }
        }
    }

    /// Append mentions as new rows, creating the file and table on first write.
    ///
    /// Empty input is a logged no-op returning [`Outcome::Empty`]. Does not
    /// deduplicate. All rows are written in one transaction; a failure is
    /// logged, rolls back, and is returned as [`Outcome::Failed`].
    pub async fn append(&self, mentions: &[Mention]) -> Outcome<usize> {
        if mentions.is_empty() {
            tracing::info!("no mentions to save");
            return Outcome::Empty;
        }

        match self.try_append(mentions).await {
            Ok(count) => {
                tracing::info!(count, table = crate::TABLE_NAME, "saved new mentions");
                Outcome::Success(count)
            }
            Err(e) => {
                tracing::error!(path = %self.path.display(), error = %e, "failed to save mentions");
                Outcome::Failed(e.to_string())
            }
        }
    }

    /// Count stored rows. Same empty/failed semantics as [`Self::load_all`].
    pub async fn count(&self) -> Outcome<i64> {
        if !self.path.exists() {
            return Outcome::Empty;
        }

        match self.try_count().await {
            Ok(Some(n)) if n > 0 => Outcome::Success(n),
            Ok(_) => Outcome::Empty,
            Err(e) => {
                tracing::error!(path = %self.path.display(), error = %e, "failed to count mentions");
                Outcome::Failed(e.to_string())
            }
        }
    }

    /// Ids of every stored mention. A failed load counts as no ids.
    pub async fn existing_ids(&self) -> HashSet<String> {
        self.load_all()
            .await
            .into_value()
            .into_iter()
            .map(|m| m.id)
            .collect()
    }

    /// Modification time of the database file, if it exists.
    #[must_use]
    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        let modified = std::fs::metadata(&self.path).ok()?.modified().ok()?;
        Some(DateTime::<Utc>::from(modified))
    }

    async fn connect(&self, create: bool) -> Result<SqliteConnection, DbError> {
        if create {
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| DbError::CreateDir {
                    path: parent.display().to_string(),
                    source: e,
                })?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(create);

        Ok(SqliteConnection::connect_with(&options).await?)
    }

    async fn try_load_all(&self) -> Result<Option<Vec<Mention>>, DbError> {
        let mut conn = self.connect(false).await?;
        let result = select_all(&mut conn).await;
        close_quietly(conn).await;
        result
    }

    async fn try_append(&self, mentions: &[Mention]) -> Result<usize, DbError> {
        let mut conn = self.connect(true).await?;
        let result = insert_all(&mut conn, mentions).await;
        close_quietly(conn).await;
        result
    }

    async fn try_count(&self) -> Result<Option<i64>, DbError> {
        let mut conn = self.connect(false).await?;
        let result = count_rows(&mut conn).await;
        close_quietly(conn).await;
        result
    }
}

async fn select_all(conn: &mut SqliteConnection) -> Result<Option<Vec<Mention>>, DbError> {
    if !table_exists(conn).await? {
        return Ok(None);
    }
    let rows = sqlx::query_as::<_, MentionRow>(SELECT_ALL_SQL)
        .fetch_all(&mut *conn)
        .await?;
    let mentions = rows
        .into_iter()
        .filter_map(|row| match Mention::try_from(row) {
            Ok(mention) => Some(mention),
            Err(e) => {
                tracing::warn!(error = %e, "skipping unusable stored row");
                None
            }
        })
        .collect();
    Ok(Some(mentions))
}

async fn insert_all(conn: &mut SqliteConnection, mentions: &[Mention]) -> Result<usize, DbError> {
    let mut tx = conn.begin().await?;
    sqlx::query(CREATE_TABLE_SQL).execute(&mut *tx).await?;
    for mention in mentions {
        sqlx::query(INSERT_SQL)
            .bind(&mention.id)
            .bind(&mention.brand)
            .bind(&mention.text)
            .bind(&mention.subreddit)
            .bind(&mention.author)
            .bind(epoch_seconds(mention.created_utc))
            .bind(mention.sentiment_score)
            .bind(mention.sentiment_label.as_str())
            .bind(&mention.url)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    Ok(mentions.len())
}

async fn count_rows(conn: &mut SqliteConnection) -> Result<Option<i64>, DbError> {
    if !table_exists(conn).await? {
        return Ok(None);
    }
    let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM mentions")
        .fetch_one(&mut *conn)
        .await?;
    Ok(Some(n))
}

async fn table_exists(conn: &mut SqliteConnection) -> Result<bool, DbError> {
    let found: Option<String> =
        sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?")
            .bind(crate::TABLE_NAME)
            .fetch_optional(&mut *conn)
            .await?;
    Ok(found.is_some())
}

async fn close_quietly(conn: SqliteConnection) {
    if let Err(e) = conn.close().await {
        tracing::debug!(error = %e, "error closing sqlite connection");
    }
}
