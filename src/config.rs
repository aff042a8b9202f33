// ABOUTME: Environment-based configuration for the Echo server
// ABOUTME: Explicit configuration structs replacing module-level mutable state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Echo Platform

//! Environment-based configuration management
//!
//! All runtime settings come from the environment at startup and are carried
//! in explicit structs from there on; nothing reads the environment at use
//! sites. The generation settings feed [`crate::llm::GenerationConfig`],
//! which is handed to the client constructor.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;
use tracing::info;

use crate::llm::GenerationConfig;

/// Minimum accepted JWT secret length, in bytes
const MIN_JWT_SECRET_LEN: usize = 32;

/// Default HTTP port
const DEFAULT_HTTP_PORT: u16 = 8081;

/// Default database location
const DEFAULT_DATABASE_URL: &str = "sqlite:./data/echo.db";

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HS256 signing secret (min. 32 bytes)
    pub jwt_secret: String,
    /// Access token lifetime in minutes
    pub access_expiry_minutes: i64,
    /// Refresh token lifetime in days
    pub refresh_expiry_days: i64,
}

/// Top-level server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Database URL (`sqlite:path` or `sqlite::memory:`)
    pub database_url: String,
    /// Authentication settings
    pub auth: AuthConfig,
    /// Generation service settings
    pub generation: GenerationConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// Required: `JWT_SECRET` (min. 32 bytes). Everything else has defaults:
    /// `HTTP_PORT`, `DATABASE_URL`, `OLLAMA_BASE_URL`, `OLLAMA_MODEL`.
    ///
    /// # Errors
    ///
    /// Returns an error when a required variable is missing or a value fails
    /// validation.
    pub fn from_env() -> Result<Self> {
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        anyhow::ensure!(
            jwt_secret.len() >= MIN_JWT_SECRET_LEN,
            "JWT_SECRET must be at least {MIN_JWT_SECRET_LEN} characters"
        );

        let http_port = match env::var("HTTP_PORT") {
            Ok(raw) => raw.parse::<u16>().context("HTTP_PORT must be a port number")?,
            Err(_) => DEFAULT_HTTP_PORT,
        };

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned());

        let mut generation = GenerationConfig::default();
        if let Ok(base_url) = env::var("OLLAMA_BASE_URL") {
            anyhow::ensure!(
                base_url.starts_with("http://") || base_url.starts_with("https://"),
                "OLLAMA_BASE_URL must start with http:// or https://"
            );
            generation.base_url = base_url;
        }
        if let Ok(model) = env::var("OLLAMA_MODEL") {
            generation.model = model;
        }
        if let Ok(raw) = env::var("OLLAMA_TIMEOUT_SECS") {
            let secs = raw
                .parse::<u64>()
                .context("OLLAMA_TIMEOUT_SECS must be a number of seconds")?;
            generation.chat_timeout = Duration::from_secs(secs);
        }

        Ok(Self {
            http_port,
            database_url,
            auth: AuthConfig {
                jwt_secret,
                access_expiry_minutes: 15,
                refresh_expiry_days: 7,
            },
            generation,
        })
    }

    /// Log a redacted configuration summary at startup
    pub fn log_summary(&self) {
        info!(
            "Configuration: port={}, database={}, generation endpoint={}, model={}",
            self.http_port, self.database_url, self.generation.base_url, self.generation.model
        );
    }
}
