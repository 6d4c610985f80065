//! SQLite chat repository implementation.
//!
//! Each row is one turn: the user's message and the reply it produced.

use chatbridge_core::repository::chat::ChatRepository;
use chatbridge_types::chat::{ChatMessage, NewChatMessage};
use chatbridge_types::error::RepositoryError;
use chatbridge_types::user::UserId;
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `ChatRepository`.
pub struct SqliteChatRepository {
    pool: DatabasePool,
}

impl SqliteChatRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct ChatRow {
    id: i64,
    user_id: String,
    message: String,
    reply: String,
    created_at: String,
}

impl ChatRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            message: row.try_get("message")?,
            reply: row.try_get("reply")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<ChatMessage, RepositoryError> {
        Ok(ChatMessage {
            id: self.id,
            user_id: UserId::new(self.user_id),
            message: self.message,
            reply: self.reply,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

fn rows_to_messages(rows: &[sqlx::sqlite::SqliteRow]) -> Result<Vec<ChatMessage>, RepositoryError> {
    let mut messages = Vec::with_capacity(rows.len());
    for row in rows {
        let r = ChatRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
        messages.push(r.into_message()?);
    }
    Ok(messages)
}

impl ChatRepository for SqliteChatRepository {
    async fn insert(&self, message: &NewChatMessage) -> Result<ChatMessage, RepositoryError> {
        let row = sqlx::query(
            r#"INSERT INTO chats (user_id, message, reply, created_at)
               VALUES (?, ?, ?, ?)
               RETURNING id"#,
        )
        .bind(message.user_id.as_str())
        .bind(&message.message)
        .bind(&message.reply)
        .bind(format_datetime(&message.created_at))
        .fetch_one(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let id: i64 = row
            .try_get("id")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(ChatMessage {
            id,
            user_id: message.user_id.clone(),
            message: message.message.clone(),
            reply: message.reply.clone(),
            created_at: message.created_at,
        })
    }

    async fn recent_for_user(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        // Newest `limit` rows, then flipped back to chronological order.
        let rows = sqlx::query(
            r#"SELECT * FROM (
                   SELECT * FROM chats
                   WHERE user_id = ?
                   ORDER BY created_at DESC, id DESC
                   LIMIT ?
               )
               ORDER BY created_at ASC, id ASC"#,
        )
        .bind(user_id.as_str())
        .bind(limit as i64)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows_to_messages(&rows)
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<ChatMessage>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM chats WHERE user_id = ? ORDER BY id ASC")
            .bind(user_id.as_str())
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows_to_messages(&rows)
    }
}
