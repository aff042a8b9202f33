// ABOUTME: Generation service abstraction for the external LLM inference endpoint
// ABOUTME: Defines message types, error taxonomy, telemetry contract, and client configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Echo Platform

//! # Generation Service Interface
//!
//! This module wraps the external text-generation service (an Ollama-style
//! HTTP API) behind a typed client with a closed error taxonomy.
//!
//! ## Key Concepts
//!
//! - **[`ChatMessage`]**: role-tagged message structure for conversations
//! - **[`GenerationError`]**: unified failure type; transient kinds (timeout,
//!   connection) are retried inside the client, terminal kinds surface
//!   immediately
//! - **[`TelemetrySink`]**: receives one record per generation attempt
//! - **[`GenerationConfig`]**: explicit configuration passed to the client
//!   constructor instead of process-global state
//!
//! ## Example
//!
//! ```rust,no_run
//! use echo_server::llm::{CallContext, ChatMessage, GenerationClient, GenerationConfig};
//! use echo_server::llm::NullTelemetry;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), echo_core::AppError> {
//! let client = GenerationClient::new(GenerationConfig::default(), Arc::new(NullTelemetry))?;
//! let messages = vec![
//!     ChatMessage::system("You are a supportive listener."),
//!     ChatMessage::user("I had a rough day."),
//! ];
//! let reply = client.chat(&messages, &CallContext::anonymous("example")).await;
//! # Ok(())
//! # }
//! ```

mod client;
pub mod prompts;
mod transport;

pub use client::{ConnectivityReport, GenerationClient};
pub use transport::{GenerationTransport, HttpTransport, TransportError, TransportResponse};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

// ============================================================================
// Message Types
// ============================================================================

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction message
    System,
    /// User input message
    User,
    /// Assistant response message
    Assistant,
}

impl MessageRole {
    /// Convert to string representation for API calls
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A single message in a chat conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender
    pub role: MessageRole,
    /// Content of the message
    pub content: String,
}

impl ChatMessage {
    /// Create a new chat message
    #[must_use]
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Create a user message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Create an assistant message
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

// ============================================================================
// Error Taxonomy
// ============================================================================

/// Classified generation failure kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationErrorKind {
    /// The service returned a 200 with an empty or whitespace-only reply
    EmptyResponse,
    /// The configured model is not available on the service (HTTP 404)
    ModelNotFound,
    /// The service returned a non-success status other than 404
    ApiError,
    /// The request exceeded the transport timeout
    Timeout,
    /// The connection to the service could not be established
    ConnectionError,
}

impl GenerationErrorKind {
    /// Snake-case identifier used in logs and telemetry
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptyResponse => "empty_response",
            Self::ModelNotFound => "model_not_found",
            Self::ApiError => "api_error",
            Self::Timeout => "timeout",
            Self::ConnectionError => "connection_error",
        }
    }

    /// Whether the client retries this kind internally
    #[must_use]
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::Timeout | Self::ConnectionError)
    }
}

/// Unified generation failure
///
/// Every failure path of the generation client resolves to this type so
/// callers handle failure uniformly instead of matching sentinel strings.
#[derive(Debug, Clone, thiserror::Error)]
pub struct GenerationError {
    /// Failure classification
    pub kind: GenerationErrorKind,
    /// Human-readable detail
    pub message: String,
}

impl GenerationError {
    /// Create a new error with the given kind and message
    pub fn new(kind: GenerationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Empty or whitespace-only reply
    #[must_use]
    pub fn empty_response() -> Self {
        Self::new(
            GenerationErrorKind::EmptyResponse,
            "Received an empty reply from the model",
        )
    }

    /// Configured model missing on the service
    pub fn model_not_found(model: impl fmt::Display) -> Self {
        Self::new(
            GenerationErrorKind::ModelNotFound,
            format!("Model {model} was not found"),
        )
    }

    /// Non-success status other than 404
    pub fn api_error(status: u16, detail: impl fmt::Display) -> Self {
        Self::new(
            GenerationErrorKind::ApiError,
            format!("API error ({status}): {detail}"),
        )
    }

    /// Transport timeout
    #[must_use]
    pub fn timeout() -> Self {
        Self::new(
            GenerationErrorKind::Timeout,
            "Generation request timed out",
        )
    }

    /// Transport connection failure
    pub fn connection(detail: impl fmt::Display) -> Self {
        Self::new(
            GenerationErrorKind::ConnectionError,
            format!("Connection failed: {detail}"),
        )
    }

    /// Classify a transport-level failure
    #[must_use]
    pub fn from_transport(error: &TransportError) -> Self {
        match error {
            TransportError::Timeout => Self::timeout(),
            TransportError::Connection(detail) => Self::connection(detail),
        }
    }
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.as_str(), self.message)
    }
}

impl From<GenerationError> for echo_core::AppError {
    fn from(error: GenerationError) -> Self {
        Self::service_unavailable(format!("AI service is unavailable: {}", error.message))
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Explicit configuration for the generation client
///
/// Passed to [`GenerationClient::new`] instead of being read from the
/// environment at use sites.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Base URL of the generation service (e.g. <http://localhost:11434>)
    pub base_url: String,
    /// Model name requested on every call
    pub model: String,
    /// Sampling temperature sent with every request
    pub temperature: f64,
    /// Timeout for chat-endpoint requests
    pub chat_timeout: Duration,
    /// Timeout for generate-endpoint requests (long-form analyses)
    pub generate_timeout: Duration,
    /// Timeout for diagnostic probe requests
    pub probe_timeout: Duration,
    /// Total attempts for transient failures (including the first)
    pub retry_attempts: u32,
    /// Fixed delay between attempts
    pub retry_delay: Duration,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_owned(),
            model: "llama2".to_owned(),
            temperature: 0.1,
            chat_timeout: Duration::from_secs(120),
            generate_timeout: Duration::from_secs(180),
            probe_timeout: Duration::from_secs(30),
            retry_attempts: 3,
            retry_delay: Duration::from_secs(2),
        }
    }
}

// ============================================================================
// Telemetry Contract
// ============================================================================

/// One telemetry record per generation attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// Owning user, when known
    pub user_id: Option<String>,
    /// Calling endpoint name (conversation mode or analysis entry point)
    pub endpoint: String,
    /// Model the request was addressed to
    pub model: String,
    /// Estimated tokens in the prompt
    pub prompt_tokens: Option<i64>,
    /// Estimated tokens in the completion
    pub completion_tokens: Option<i64>,
    /// Estimated total tokens
    pub total_tokens: Option<i64>,
    /// Wall-clock latency of the call in milliseconds
    pub response_time_ms: f64,
    /// Sampling temperature used
    pub temperature: Option<f64>,
    /// Whether the attempt produced a usable reply
    pub success: bool,
    /// Failure detail for unsuccessful attempts
    pub error_message: Option<String>,
}

/// Sink for generation telemetry
///
/// Implementations must not fail the generation path; persistence errors are
/// logged and swallowed inside the sink.
#[async_trait]
pub trait TelemetrySink: Send + Sync {
    /// Record one generation attempt
    async fn record_generation(&self, record: GenerationRecord);
}

/// Telemetry sink that discards all records
///
/// Used by doc examples and callers that have no store wired up.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTelemetry;

#[async_trait]
impl TelemetrySink for NullTelemetry {
    async fn record_generation(&self, _record: GenerationRecord) {}
}

// ============================================================================
// Call Context
// ============================================================================

/// Attribution for a generation call, carried into telemetry records
#[derive(Debug, Clone)]
pub struct CallContext {
    /// Owning user, when the call happens on behalf of one
    pub user_id: Option<String>,
    /// Calling endpoint name
    pub endpoint: String,
}

impl CallContext {
    /// Context for a call on behalf of a user
    pub fn for_user(user_id: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            endpoint: endpoint.into(),
        }
    }

    /// Context for a call with no associated user
    pub fn anonymous(endpoint: impl Into<String>) -> Self {
        Self {
            user_id: None,
            endpoint: endpoint.into(),
        }
    }
}

/// Estimate the token count of a text with a coarse character heuristic
///
/// Roughly four characters per token, never less than one.
#[must_use]
pub fn estimate_tokens(text: &str) -> i64 {
    (text.chars().count() / 4).max(1) as i64
}
