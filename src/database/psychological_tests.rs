// ABOUTME: Database operations for psychological test submissions
// ABOUTME: Immutable inserts plus filtered, paginated history reads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Echo Platform

use echo_core::models::TestType;
use echo_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// Database representation of one test submission
///
/// Submissions are immutable; the score is derived from the answers at
/// submission time and never updated independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestRecord {
    /// Unique submission ID
    pub id: String,
    /// User the submission belongs to
    pub user_id: String,
    /// Test type (asrs, gad7, phq9)
    pub test_type: String,
    /// Raw answers as submitted
    pub answers: Value,
    /// Numeric score derived from the answers
    pub score: f64,
    /// Interpretation label derived from the answers
    pub interpretation: String,
    /// Generated narrative analysis, or the label-only fallback
    pub analysis: String,
    /// When the submission was created (ISO 8601)
    pub created_at: String,
}

fn row_to_test(row: &sqlx::sqlite::SqliteRow) -> TestRecord {
    let answers_text: String = row.get("answers");
    TestRecord {
        id: row.get("id"),
        user_id: row.get("user_id"),
        test_type: row.get("test_type"),
        answers: serde_json::from_str(&answers_text).unwrap_or(Value::Null),
        score: row.get("score"),
        interpretation: row.get("interpretation"),
        analysis: row.get("analysis"),
        created_at: row.get("created_at"),
    }
}

/// Psychological test submission database operations
pub struct TestManager {
    pool: SqlitePool,
}

impl TestManager {
    /// Create a new test manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist one submission
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn insert(
        &self,
        user_id: &str,
        test_type: TestType,
        answers: &Value,
        score: f64,
        interpretation: &str,
        analysis: &str,
    ) -> AppResult<TestRecord> {
        let id = Uuid::new_v4().to_string();
        let now = chrono::Utc::now().to_rfc3339();
        let answers_text = answers.to_string();

        sqlx::query(
            r"
            INSERT INTO psychological_tests (id, user_id, test_type, answers, score, interpretation, analysis, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(&id)
        .bind(user_id)
        .bind(test_type.as_str())
        .bind(&answers_text)
        .bind(score)
        .bind(interpretation)
        .bind(analysis)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save test submission: {e}")))?;

        Ok(TestRecord {
            id,
            user_id: user_id.to_owned(),
            test_type: test_type.as_str().to_owned(),
            answers: answers.clone(),
            score,
            interpretation: interpretation.to_owned(),
            analysis: analysis.to_owned(),
            created_at: now,
        })
    }

    /// Paginated submission history for a user, newest first
    ///
    /// Returns the requested page and the total count matching the filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn history(
        &self,
        user_id: &str,
        test_type: Option<TestType>,
        limit: i64,
        offset: i64,
    ) -> AppResult<(Vec<TestRecord>, i64)> {
        let type_filter = test_type.map(TestType::as_str);

        let count_row = sqlx::query(
            r"
            SELECT COUNT(*) AS total_count
            FROM psychological_tests
            WHERE user_id = $1 AND ($2 IS NULL OR test_type = $2)
            ",
        )
        .bind(user_id)
        .bind(type_filter)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to count test submissions: {e}")))?;
        let total: i64 = count_row.get("total_count");

        let rows = sqlx::query(
            r"
            SELECT id, user_id, test_type, answers, score, interpretation, analysis, created_at
            FROM psychological_tests
            WHERE user_id = $1 AND ($2 IS NULL OR test_type = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            ",
        )
        .bind(user_id)
        .bind(type_filter)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load test history: {e}")))?;

        Ok((rows.iter().map(row_to_test).collect(), total))
    }

    /// Fetch one submission owned by the given user
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn get(&self, test_id: &str, user_id: &str) -> AppResult<Option<TestRecord>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, test_type, answers, score, interpretation, analysis, created_at
            FROM psychological_tests
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(test_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load test submission: {e}")))?;

        Ok(row.as_ref().map(row_to_test))
    }
}
