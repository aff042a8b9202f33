// ABOUTME: Database operations for conversation history turns
// ABOUTME: Immutable inserts plus windowed and counted reads per (user, mode)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Echo Platform

use echo_core::models::ConversationMode;
use echo_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// Database representation of one conversation turn
///
/// Turns are immutable once created; both user messages and generated
/// replies are stored in the same bucket, distinguished by
/// `is_user_message`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Unique turn ID
    pub id: String,
    /// User the turn belongs to
    pub user_id: String,
    /// Conversation mode bucket
    pub mode: String,
    /// Message text
    pub message: String,
    /// True for user-authored turns, false for generated replies
    pub is_user_message: bool,
    /// When the turn was created (ISO 8601)
    pub created_at: String,
}

fn row_to_turn(row: &sqlx::sqlite::SqliteRow) -> TurnRecord {
    TurnRecord {
        id: row.get("id"),
        user_id: row.get("user_id"),
        mode: row.get("mode"),
        message: row.get("message"),
        is_user_message: row.get("is_user_message"),
        created_at: row.get("created_at"),
    }
}

/// Conversation history database operations
pub struct ConversationManager {
    pool: SqlitePool,
}

impl ConversationManager {
    /// Create a new conversation manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist one turn
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn insert_turn(
        &self,
        user_id: &str,
        mode: ConversationMode,
        message: &str,
        is_user_message: bool,
    ) -> AppResult<TurnRecord> {
        let id = Uuid::new_v4().to_string();
        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            r"
            INSERT INTO conversation_history (id, user_id, mode, message, is_user_message, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(&id)
        .bind(user_id)
        .bind(mode.as_str())
        .bind(message)
        .bind(is_user_message)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save conversation turn: {e}")))?;

        Ok(TurnRecord {
            id,
            user_id: user_id.to_owned(),
            mode: mode.as_str().to_owned(),
            message: message.to_owned(),
            is_user_message,
            created_at: now,
        })
    }

    /// Fetch the most recent turns for (user, mode), oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn recent_turns(
        &self,
        user_id: &str,
        mode: ConversationMode,
        limit: i64,
    ) -> AppResult<Vec<TurnRecord>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, mode, message, is_user_message, created_at
            FROM conversation_history
            WHERE user_id = $1 AND mode = $2
            ORDER BY created_at DESC
            LIMIT $3
            ",
        )
        .bind(user_id)
        .bind(mode.as_str())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load conversation history: {e}")))?;

        // Query returns newest-first; callers want chronological order.
        let mut turns: Vec<TurnRecord> = rows.iter().map(row_to_turn).collect();
        turns.reverse();
        Ok(turns)
    }

    /// Count turns for (user, mode)
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn count_turns(&self, user_id: &str, mode: ConversationMode) -> AppResult<i64> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS turn_count FROM conversation_history WHERE user_id = $1 AND mode = $2",
        )
        .bind(user_id)
        .bind(mode.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to count conversation turns: {e}")))?;

        Ok(row.get("turn_count"))
    }
}
