// ABOUTME: JWT-based user authentication with access/refresh token scopes
// ABOUTME: Token generation and validation, bcrypt hashing, password strength rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Echo Platform

//! # Authentication
//!
//! HS256 JWT tokens with two scopes: short-lived `access_token` and
//! long-lived `refresh_token`. The subject is the username; scope mismatch
//! is rejected at validation time so a refresh token can never be used to
//! call an authenticated endpoint directly.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use echo_core::{AppError, AppResult};

/// Scope claim for access tokens
pub const SCOPE_ACCESS: &str = "access_token";

/// Scope claim for refresh tokens
pub const SCOPE_REFRESH: &str = "refresh_token";

/// Special characters accepted by the password strength rules
const PASSWORD_SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

/// JWT claims for user authentication
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Username the token was issued to
    pub sub: String,
    /// Token scope (access or refresh)
    pub scope: String,
    /// Issued-at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

/// Authentication manager for JWT tokens and password handling
#[derive(Clone)]
pub struct AuthManager {
    secret: String,
    access_expiry_minutes: i64,
    refresh_expiry_days: i64,
}

impl AuthManager {
    /// Create a new authentication manager
    #[must_use]
    pub const fn new(secret: String, access_expiry_minutes: i64, refresh_expiry_days: i64) -> Self {
        Self {
            secret,
            access_expiry_minutes,
            refresh_expiry_days,
        }
    }

    fn create_token(&self, subject: &str, scope: &str, lifetime: Duration) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_owned(),
            scope: scope.to_owned(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))
    }

    /// Issue a short-lived access token for a user
    ///
    /// # Errors
    ///
    /// Returns an error if token encoding fails.
    pub fn generate_access_token(&self, username: &str) -> AppResult<String> {
        self.create_token(
            username,
            SCOPE_ACCESS,
            Duration::minutes(self.access_expiry_minutes),
        )
    }

    /// Issue a long-lived refresh token for a user
    ///
    /// # Errors
    ///
    /// Returns an error if token encoding fails.
    pub fn generate_refresh_token(&self, username: &str) -> AppResult<String> {
        self.create_token(
            username,
            SCOPE_REFRESH,
            Duration::days(self.refresh_expiry_days),
        )
    }

    /// Validate a token and return its subject
    ///
    /// # Errors
    ///
    /// Returns `AuthExpired` for expired tokens, `AuthInvalid` for a wrong
    /// scope, bad signature, or malformed token.
    pub fn validate_token(&self, token: &str, expected_scope: &str) -> AppResult<String> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::auth_expired(),
            _ => AppError::auth_invalid(format!("Token could not be verified: {e}")),
        })?;

        if data.claims.scope != expected_scope {
            return Err(AppError::auth_invalid("Wrong token type"));
        }
        if data.claims.sub.is_empty() {
            return Err(AppError::auth_invalid("Token carries no subject"));
        }

        Ok(data.claims.sub)
    }

    /// Hash a password with bcrypt
    ///
    /// # Errors
    ///
    /// Returns an error if hashing fails.
    pub fn hash_password(password: &str) -> AppResult<String> {
        bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))
    }

    /// Verify a password against its bcrypt hash
    ///
    /// # Errors
    ///
    /// Returns an error if the hash is malformed.
    pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
        bcrypt::verify(password, hash)
            .map_err(|e| AppError::internal(format!("Failed to verify password: {e}")))
    }

    /// Enforce the platform's password strength rules
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` naming the first unmet rule.
    pub fn validate_password_strength(password: &str) -> AppResult<()> {
        if password.len() < 8 {
            return Err(AppError::invalid_input(
                "Password must be at least 8 characters long",
            ));
        }
        if !password.chars().any(char::is_uppercase) {
            return Err(AppError::invalid_input(
                "Password must contain at least one uppercase letter",
            ));
        }
        if !password.chars().any(char::is_lowercase) {
            return Err(AppError::invalid_input(
                "Password must contain at least one lowercase letter",
            ));
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::invalid_input(
                "Password must contain at least one digit",
            ));
        }
        if !password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c)) {
            return Err(AppError::invalid_input(
                "Password must contain at least one special character",
            ));
        }
        Ok(())
    }
}
