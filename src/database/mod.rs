// ABOUTME: Database access layer with per-area manager modules
// ABOUTME: Connection handling, schema bootstrap, and manager constructors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Echo Platform

//! Database access layer
//!
//! Each functional area gets its own manager over a shared pool:
//! [`UserManager`], [`ConversationManager`], [`TestManager`],
//! [`TelemetryManager`]. Records use uuid text primary keys and RFC 3339
//! `created_at` strings; the schema is bootstrapped with idempotent DDL.

mod conversations;
mod psychological_tests;
mod telemetry;
mod users;

pub use conversations::{ConversationManager, TurnRecord};
pub use psychological_tests::{TestManager, TestRecord};
pub use telemetry::TelemetryManager;
pub use users::{UserManager, UserRecord};

use echo_core::{AppError, AppResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;

/// Schema bootstrap statements, safe to run on every startup
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        username TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        email TEXT UNIQUE,
        display_name TEXT,
        is_active INTEGER NOT NULL DEFAULT 1,
        is_admin INTEGER NOT NULL DEFAULT 0,
        refresh_token TEXT,
        created_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS conversation_history (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        mode TEXT NOT NULL,
        message TEXT NOT NULL,
        is_user_message INTEGER NOT NULL,
        created_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_conversation_user_mode
        ON conversation_history(user_id, mode, created_at)",
    "CREATE TABLE IF NOT EXISTS psychological_tests (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        test_type TEXT NOT NULL,
        answers TEXT NOT NULL,
        score REAL NOT NULL,
        interpretation TEXT NOT NULL,
        analysis TEXT NOT NULL,
        created_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_tests_user_type
        ON psychological_tests(user_id, test_type, created_at)",
    "CREATE TABLE IF NOT EXISTS llm_metrics (
        id TEXT PRIMARY KEY,
        user_id TEXT REFERENCES users(id) ON DELETE CASCADE,
        endpoint TEXT NOT NULL,
        model TEXT NOT NULL,
        prompt_tokens INTEGER,
        completion_tokens INTEGER,
        total_tokens INTEGER,
        response_time_ms REAL NOT NULL,
        temperature REAL,
        success INTEGER NOT NULL DEFAULT 1,
        error_message TEXT,
        created_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS api_hits (
        id TEXT PRIMARY KEY,
        user_id TEXT REFERENCES users(id) ON DELETE CASCADE,
        method TEXT NOT NULL,
        path TEXT NOT NULL,
        status INTEGER NOT NULL,
        response_time_ms REAL NOT NULL,
        created_at TEXT NOT NULL
    )",
];

/// Shared database handle
///
/// Cloning is cheap; every manager shares the underlying pool.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to the database described by `url`
    ///
    /// SQLite URLs are supported (`sqlite:path` or `sqlite::memory:`); the
    /// database file is created when missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the connection fails.
    pub async fn connect(url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| AppError::config(format!("Invalid database URL: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to database: {e}")))?;

        Ok(Self { pool })
    }

    /// Bootstrap the schema
    ///
    /// # Errors
    ///
    /// Returns an error if any DDL statement fails.
    pub async fn migrate(&self) -> AppResult<()> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Schema bootstrap failed: {e}")))?;
        }
        info!("Database schema ready");
        Ok(())
    }

    /// Cheap liveness check used by the health endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if the database does not answer.
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Database ping failed: {e}")))?;
        Ok(())
    }

    /// User account operations
    #[must_use]
    pub fn users(&self) -> UserManager {
        UserManager::new(self.pool.clone())
    }

    /// Conversation history operations
    #[must_use]
    pub fn conversations(&self) -> ConversationManager {
        ConversationManager::new(self.pool.clone())
    }

    /// Psychological test submission operations
    #[must_use]
    pub fn psychological_tests(&self) -> TestManager {
        TestManager::new(self.pool.clone())
    }

    /// Telemetry record operations
    #[must_use]
    pub fn telemetry(&self) -> TelemetryManager {
        TelemetryManager::new(self.pool.clone())
    }
}
