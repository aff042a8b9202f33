// ABOUTME: Database-backed telemetry sink for generation calls and HTTP requests
// ABOUTME: Best-effort inserts; persistence failures are logged and swallowed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Echo Platform

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::llm::{GenerationRecord, TelemetrySink};

/// Telemetry database operations
///
/// Telemetry writes must never fail the request they describe, so every
/// operation logs and swallows persistence errors.
pub struct TelemetryManager {
    pool: SqlitePool,
}

impl TelemetryManager {
    /// Create a new telemetry manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record one HTTP request
    pub async fn record_api_hit(
        &self,
        user_id: Option<&str>,
        method: &str,
        path: &str,
        status: u16,
        response_time_ms: f64,
    ) {
        let result = sqlx::query(
            r"
            INSERT INTO api_hits (id, user_id, method, path, status, response_time_ms, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(user_id)
        .bind(method)
        .bind(path)
        .bind(i64::from(status))
        .bind(response_time_ms)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await;

        if let Err(e) = result {
            warn!("Failed to record api hit: {e}");
        }
    }

    /// Count generation-call records, used by tests and reporting
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn generation_record_count(&self) -> echo_core::AppResult<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM llm_metrics")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                echo_core::AppError::database(format!("Failed to count llm metrics: {e}"))
            })?;
        Ok(row.0)
    }
}

#[async_trait]
impl TelemetrySink for TelemetryManager {
    async fn record_generation(&self, record: GenerationRecord) {
        let result = sqlx::query(
            r"
            INSERT INTO llm_metrics (id, user_id, endpoint, model, prompt_tokens, completion_tokens,
                                     total_tokens, response_time_ms, temperature, success, error_message, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(record.user_id.as_deref())
        .bind(&record.endpoint)
        .bind(&record.model)
        .bind(record.prompt_tokens)
        .bind(record.completion_tokens)
        .bind(record.total_tokens)
        .bind(record.response_time_ms)
        .bind(record.temperature)
        .bind(record.success)
        .bind(record.error_message.as_deref())
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => debug!("Recorded generation metric for endpoint {}", record.endpoint),
            Err(e) => warn!("Failed to record generation metric: {e}"),
        }
    }
}
