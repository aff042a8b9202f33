// ABOUTME: Database operations for user accounts
// ABOUTME: Account creation, lookup, refresh-token storage, and profile updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Echo Platform

use echo_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// Database representation of a user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique user ID
    pub id: String,
    /// Login name, unique across the platform
    pub username: String,
    /// bcrypt password hash
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Contact email, unique when present
    pub email: Option<String>,
    /// Display name shown in the UI
    pub display_name: Option<String>,
    /// Whether the account can log in
    pub is_active: bool,
    /// Whether the account has admin privileges
    pub is_admin: bool,
    /// Currently issued refresh token, when any
    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,
    /// When the account was created (ISO 8601)
    pub created_at: String,
}

fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> UserRecord {
    UserRecord {
        id: row.get("id"),
        username: row.get("username"),
        password_hash: row.get("password_hash"),
        email: row.get("email"),
        display_name: row.get("display_name"),
        is_active: row.get("is_active"),
        is_admin: row.get("is_admin"),
        refresh_token: row.get("refresh_token"),
        created_at: row.get("created_at"),
    }
}

/// User account database operations
pub struct UserManager {
    pool: SqlitePool,
}

impl UserManager {
    /// Create a new user manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user account
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` when the username or email is taken,
    /// or a database error otherwise.
    pub async fn create(
        &self,
        username: &str,
        password_hash: &str,
        email: Option<&str>,
        display_name: Option<&str>,
    ) -> AppResult<UserRecord> {
        let id = Uuid::new_v4().to_string();
        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            r"
            INSERT INTO users (id, username, password_hash, email, display_name, is_active, is_admin, created_at)
            VALUES ($1, $2, $3, $4, $5, 1, 0, $6)
            ",
        )
        .bind(&id)
        .bind(username)
        .bind(password_hash)
        .bind(email)
        .bind(display_name)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
            {
                AppError::already_exists("An account with this username or email")
            } else {
                AppError::database(format!("Failed to create user: {e}"))
            }
        })?;

        Ok(UserRecord {
            id,
            username: username.to_owned(),
            password_hash: password_hash.to_owned(),
            email: email.map(ToOwned::to_owned),
            display_name: display_name.map(ToOwned::to_owned),
            is_active: true,
            is_admin: false,
            refresh_token: None,
            created_at: now,
        })
    }

    /// Look up a user by login name
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn get_by_username(&self, username: &str) -> AppResult<Option<UserRecord>> {
        let row = sqlx::query("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load user: {e}")))?;

        Ok(row.as_ref().map(row_to_user))
    }

    /// Look up a user by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn get_by_id(&self, user_id: &str) -> AppResult<Option<UserRecord>> {
        let row = sqlx::query("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load user: {e}")))?;

        Ok(row.as_ref().map(row_to_user))
    }

    /// Store (or clear) the user's refresh token
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn set_refresh_token(
        &self,
        user_id: &str,
        refresh_token: Option<&str>,
    ) -> AppResult<()> {
        sqlx::query("UPDATE users SET refresh_token = $1 WHERE id = $2")
            .bind(refresh_token)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to store refresh token: {e}")))?;
        Ok(())
    }

    /// Update profile fields, leaving absent fields untouched
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` when the new email is taken, or a
    /// database error otherwise.
    pub async fn update_profile(
        &self,
        user_id: &str,
        display_name: Option<&str>,
        email: Option<&str>,
    ) -> AppResult<Option<UserRecord>> {
        sqlx::query(
            r"
            UPDATE users
            SET display_name = COALESCE($1, display_name),
                email = COALESCE($2, email)
            WHERE id = $3
            ",
        )
        .bind(display_name)
        .bind(email)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
            {
                AppError::already_exists("An account with this email")
            } else {
                AppError::database(format!("Failed to update profile: {e}"))
            }
        })?;

        self.get_by_id(user_id).await
    }
}
