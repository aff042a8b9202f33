// ABOUTME: User authentication route handlers for registration, login, and token refresh
// ABOUTME: Thin wrappers over the auth manager and user store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Echo Platform

//! Authentication routes
//!
//! Registration enforces the platform's password strength rules before any
//! account is created. Login issues an access/refresh token pair and stores
//! the refresh token on the user row; refresh requires the stored token to
//! match, so a stolen-but-rotated token is useless.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::auth::{AuthManager, SCOPE_REFRESH};
use crate::database::UserRecord;
use crate::resources::ServerResources;
use echo_core::{AppError, AppResult};

/// Accepted username length bounds
const USERNAME_MIN_CHARS: usize = 5;
const USERNAME_MAX_CHARS: usize = 55;

/// User registration request
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Login name
    pub username: String,
    /// Plain-text password, validated against the strength rules
    pub password: String,
    /// Optional contact email
    #[serde(default)]
    pub email: Option<String>,
    /// Optional display name
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Public view of a user account
#[derive(Debug, Serialize, Deserialize)]
pub struct UserInfo {
    /// User ID
    pub id: String,
    /// Login name
    pub username: String,
    /// Contact email, when set
    pub email: Option<String>,
    /// Display name, when set
    pub display_name: Option<String>,
    /// Account creation timestamp
    pub created_at: String,
}

impl From<UserRecord> for UserInfo {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            display_name: user.display_name,
            created_at: user.created_at,
        }
    }
}

/// User registration response
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Created account
    pub user: UserInfo,
    /// Human-readable confirmation
    pub message: String,
}

/// User login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Login name
    pub username: String,
    /// Plain-text password
    pub password: String,
}

/// Token pair issued at login
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Short-lived access token
    pub access_token: String,
    /// Long-lived refresh token
    pub refresh_token: String,
    /// Always `bearer`
    pub token_type: String,
}

/// Token refresh request
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token issued at login
    pub refresh_token: String,
}

/// Token refresh response
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshResponse {
    /// Fresh access token
    pub access_token: String,
    /// Always `bearer`
    pub token_type: String,
}

/// Authentication routes handler
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/register", post(Self::register))
            .route("/api/auth/login", post(Self::login))
            .route("/api/auth/refresh", post(Self::refresh))
            .with_state(resources)
    }

    /// Register a new account
    async fn register(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<RegisterRequest>,
    ) -> AppResult<impl IntoResponse> {
        let username_chars = request.username.chars().count();
        if !(USERNAME_MIN_CHARS..=USERNAME_MAX_CHARS).contains(&username_chars) {
            return Err(AppError::invalid_input(format!(
                "Username must be between {USERNAME_MIN_CHARS} and {USERNAME_MAX_CHARS} characters"
            )));
        }
        AuthManager::validate_password_strength(&request.password)?;

        let password_hash = AuthManager::hash_password(&request.password)?;
        let user = resources
            .database
            .users()
            .create(
                &request.username,
                &password_hash,
                request.email.as_deref(),
                request.display_name.as_deref(),
            )
            .await?;
        info!("Registered new user {}", user.username);

        let response = RegisterResponse {
            user: user.into(),
            message: "User successfully created".to_owned(),
        };
        Ok((StatusCode::CREATED, Json(response)))
    }

    /// Log in and issue a token pair
    async fn login(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<LoginRequest>,
    ) -> AppResult<Json<LoginResponse>> {
        let user = resources
            .database
            .users()
            .get_by_username(&request.username)
            .await?
            .ok_or_else(|| AppError::auth_invalid("Invalid username or password"))?;

        if !AuthManager::verify_password(&request.password, &user.password_hash)? {
            return Err(AppError::auth_invalid("Invalid username or password"));
        }
        if !user.is_active {
            return Err(AppError::auth_invalid("Account is deactivated"));
        }

        let access_token = resources.auth.generate_access_token(&user.username)?;
        let refresh_token = resources.auth.generate_refresh_token(&user.username)?;

        resources
            .database
            .users()
            .set_refresh_token(&user.id, Some(&refresh_token))
            .await?;
        info!("User {} logged in", user.username);

        Ok(Json(LoginResponse {
            access_token,
            refresh_token,
            token_type: "bearer".to_owned(),
        }))
    }

    /// Exchange a refresh token for a new access token
    async fn refresh(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<RefreshRequest>,
    ) -> AppResult<Json<RefreshResponse>> {
        let username = resources
            .auth
            .validate_token(&request.refresh_token, SCOPE_REFRESH)?;

        let user = resources
            .database
            .users()
            .get_by_username(&username)
            .await?
            .ok_or_else(|| AppError::auth_invalid("Invalid refresh token"))?;

        if user.refresh_token.as_deref() != Some(request.refresh_token.as_str()) {
            return Err(AppError::auth_invalid("Refresh token was revoked"));
        }

        let access_token = resources.auth.generate_access_token(&user.username)?;

        Ok(Json(RefreshResponse {
            access_token,
            token_type: "bearer".to_owned(),
        }))
    }
}
