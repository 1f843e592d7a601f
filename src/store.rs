//! SQLite-backed message store shared with the external capture process.
//!
//! The table may be created and populated by that process before this one
//! ever runs, so `init` is written to converge on the expected schema
//! rather than own it: create-if-missing plus tolerated column additions.

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::{debug, info};

use crate::core::models::{RelayStats, StoredMessage};
use crate::errors::RelayError;

#[derive(Clone)]
pub struct MessageStore {
    pool: SqlitePool,
}

impl MessageStore {
    /// Open (or create) the database file at `path`.
    pub async fn connect(path: &str) -> Result<Self, RelayError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        Ok(Self { pool })
    }

    /// Wrap an already-connected pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Converge the schema: create the table if the capture process has
    /// not, and add columns that predate-this-version databases lack. The
    /// column additions fail with "duplicate column name" on any database
    /// that already has them, which is the expected steady state.
    pub async fn init(&self) -> Result<(), RelayError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS messages (
                id INTEGER PRIMARY KEY,
                chat_id INTEGER,
                sender TEXT,
                text TEXT,
                date TEXT,
                chat_title TEXT,
                is_summarized INTEGER DEFAULT 0
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        for alter in [
            "ALTER TABLE messages ADD COLUMN chat_title TEXT",
            "ALTER TABLE messages ADD COLUMN is_summarized INTEGER DEFAULT 0",
        ] {
            if let Err(e) = sqlx::query(alter).execute(&self.pool).await {
                debug!(error = %e, "schema column already present");
            }
        }

        info!("message store initialized");
        Ok(())
    }

    /// Insert a captured message, skipping duplicates by id.
    ///
    /// Returns whether a row was actually inserted. Re-ingestion of an
    /// already-stored id is a no-op, which keeps the capture process free
    /// to replay history without double-relaying anything.
    pub async fn save_message(
        &self,
        id: i64,
        chat_id: i64,
        sender: &str,
        text: &str,
        date: &str,
        chat_title: &str,
    ) -> Result<bool, RelayError> {
        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO messages (id, chat_id, sender, text, date, chat_title, is_summarized)
            VALUES (?, ?, ?, ?, ?, ?, 0)
            "#,
        )
        .bind(id)
        .bind(chat_id)
        .bind(sender)
        .bind(text)
        .bind(date)
        .bind(chat_title)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// All messages not yet relayed, oldest first.
    ///
    /// Re-reads the table on every call; there is no in-memory view of the
    /// queue, so a restart picks up exactly where the flags say.
    pub async fn fetch_unprocessed(&self) -> Result<Vec<StoredMessage>, RelayError> {
        let rows = sqlx::query_as::<_, StoredMessage>(
            r#"
            SELECT id,
                   COALESCE(chat_id, 0) AS chat_id,
                   COALESCE(sender, '') AS sender,
                   COALESCE(text, '') AS text,
                   COALESCE(date, '') AS date,
                   COALESCE(chat_title, '') AS chat_title
            FROM messages
            WHERE is_summarized = 0 OR is_summarized IS NULL
            ORDER BY date ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Flip the processed flag for one message. Idempotent: marking an
    /// already-processed or unknown id changes nothing and is not an error.
    pub async fn mark_processed(&self, id: i64) -> Result<(), RelayError> {
        sqlx::query("UPDATE messages SET is_summarized = 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Aggregate counts for the reporting surface.
    pub async fn stats(&self) -> Result<RelayStats, RelayError> {
        let total_messages =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM messages")
                .fetch_one(&self.pool)
                .await?;
        let summarized_messages =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM messages WHERE is_summarized = 1")
                .fetch_one(&self.pool)
                .await?;
        let last_summarized = sqlx::query_scalar::<_, Option<String>>(
            "SELECT MAX(date) FROM messages WHERE is_summarized = 1",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(RelayStats {
            total_messages,
            summarized_messages,
            last_summarized,
        })
    }
}
