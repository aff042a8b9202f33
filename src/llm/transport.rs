// ABOUTME: HTTP transport seam for the generation client
// ABOUTME: Wraps reqwest behind a trait so retry logic can be exercised without a live server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Echo Platform

//! Transport layer for the generation client
//!
//! The client talks to the generation service through [`GenerationTransport`]
//! so that the retry and classification logic can be driven by a scripted
//! transport in tests. [`HttpTransport`] is the production implementation.

use async_trait::async_trait;
use echo_core::AppError;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Connection timeout for the underlying HTTP client
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Raw response from the generation service
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl TransportResponse {
    /// Convenience constructor
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Transport-level failure, before any HTTP status is available
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    /// The request exceeded its deadline
    #[error("request timed out")]
    Timeout,
    /// The connection could not be established or was interrupted
    #[error("connection failed: {0}")]
    Connection(String),
}

/// Transport seam between the generation client and the wire
#[async_trait]
pub trait GenerationTransport: Send + Sync {
    /// POST a JSON payload and return the raw response
    async fn post_json(
        &self,
        url: &str,
        payload: &Value,
        timeout: Duration,
    ) -> Result<TransportResponse, TransportError>;

    /// GET a URL and return the raw response
    async fn get(&self, url: &str, timeout: Duration)
        -> Result<TransportResponse, TransportError>;
}

/// Production transport backed by a pooled reqwest client
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a new transport with a pooled HTTP client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self, AppError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    fn classify(error: &reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Connection(error.to_string())
        }
    }
}

#[async_trait]
impl GenerationTransport for HttpTransport {
    async fn post_json(
        &self,
        url: &str,
        payload: &Value,
        timeout: Duration,
    ) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .post(url)
            .timeout(timeout)
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| Self::classify(&e))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| Self::classify(&e))?;

        Ok(TransportResponse { status, body })
    }

    async fn get(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| Self::classify(&e))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| Self::classify(&e))?;

        Ok(TransportResponse { status, body })
    }
}
