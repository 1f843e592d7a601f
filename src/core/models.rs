use sqlx::FromRow;

/// One captured chat message, as stored by the external ingestion process.
///
/// Column names follow the shared `messages` table; NULL text columns are
/// coalesced to empty strings at query level.
#[derive(Debug, Clone, FromRow)]
pub struct StoredMessage {
    pub id: i64,
    pub chat_id: i64,
    pub sender: String,
    pub text: String,
    pub date: String,
    pub chat_title: String,
}

/// Aggregate relay progress, read by the `/stats` command.
#[derive(Debug, Clone, Default)]
pub struct RelayStats {
    pub total_messages: i64,
    pub summarized_messages: i64,
    pub last_summarized: Option<String>,
}
