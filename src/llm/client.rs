// ABOUTME: Generation client with bounded retries and failure classification
// ABOUTME: Calls the Ollama-style chat/generate endpoints and records per-attempt telemetry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Echo Platform

//! Generation client for the external inference service
//!
//! Two call paths with different retry behavior:
//!
//! - [`GenerationClient::chat`] — latency-sensitive conversation replies.
//!   Transport timeouts and connection failures are retried up to the attempt
//!   budget; empty replies, missing models (404), and other API errors are
//!   terminal.
//! - [`GenerationClient::generate`] — long-form analyses. Same transport
//!   retry policy, and additionally retries empty replies within the attempt
//!   budget. 404 stays terminal: the model will not appear by waiting.
//!
//! Every attempt, success or failure, emits one telemetry record.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::time::sleep;
use tracing::{debug, error, warn};

use super::{
    estimate_tokens, CallContext, ChatMessage, GenerationConfig, GenerationError,
    GenerationRecord, GenerationTransport, HttpTransport, TelemetrySink, TransportResponse,
};
use echo_core::AppError;

/// Stop sequences sent with every request to keep chat-template markers out
/// of the generated text
const STOP_SEQUENCES: [&str; 3] = ["<|start_header_id|>", "<|end_header_id|>", "<|eot_id|>"];

/// Maximum error-body excerpt carried into error messages
const ERROR_BODY_EXCERPT_CHARS: usize = 200;

// ============================================================================
// Wire Types
// ============================================================================

/// Successful chat-endpoint response body
#[derive(Debug, Deserialize)]
struct ChatApiResponse {
    #[serde(default)]
    message: ChatApiMessage,
}

/// Message envelope within a chat response
#[derive(Debug, Default, Deserialize)]
struct ChatApiMessage {
    #[serde(default)]
    content: String,
}

/// Successful generate-endpoint response body
#[derive(Debug, Deserialize)]
struct GenerateApiResponse {
    #[serde(default)]
    response: String,
}

/// Error response body shared by both endpoints
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
}

/// Model listing returned by the tags endpoint
#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagModel>,
}

/// One entry in the model listing
#[derive(Debug, Deserialize)]
struct TagModel {
    #[serde(default)]
    name: String,
}

/// Diagnostic report produced by [`GenerationClient::probe`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectivityReport {
    /// Service base URL the probe targeted
    pub base_url: String,
    /// Configured model name
    pub model: String,
    /// Whether the configured model appears in the service's model listing
    pub model_loaded: bool,
    /// Whether the chat endpoint answered the probe
    pub chat_api_working: bool,
    /// Whether the generate endpoint answered the probe
    pub generate_api_working: bool,
    /// Reply text from the chat probe, when any
    pub chat_response: String,
    /// Reply text from the generate probe, when any
    pub generate_response: String,
    /// Errors collected along the way
    pub errors: Vec<String>,
}

// ============================================================================
// Client
// ============================================================================

/// Client for the external generation service
///
/// Holds its configuration explicitly; there is no hidden global state.
pub struct GenerationClient {
    transport: Box<dyn GenerationTransport>,
    telemetry: Arc<dyn TelemetrySink>,
    config: GenerationConfig,
}

impl GenerationClient {
    /// Create a client backed by the production HTTP transport
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(
        config: GenerationConfig,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Result<Self, AppError> {
        let transport = HttpTransport::new()?;
        Ok(Self::with_transport(config, telemetry, Box::new(transport)))
    }

    /// Create a client with a custom transport
    ///
    /// Used by tests to script responses, and available for alternative
    /// wire implementations.
    #[must_use]
    pub fn with_transport(
        config: GenerationConfig,
        telemetry: Arc<dyn TelemetrySink>,
        transport: Box<dyn GenerationTransport>,
    ) -> Self {
        Self {
            transport,
            telemetry,
            config,
        }
    }

    /// Configured model name
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.config.base_url.trim_end_matches('/'))
    }

    fn chat_payload(&self, messages: &[ChatMessage]) -> Value {
        let wire_messages: Vec<Value> = messages
            .iter()
            .map(|m| json!({"role": m.role.as_str(), "content": m.content}))
            .collect();

        json!({
            "model": self.config.model,
            "messages": wire_messages,
            "stream": false,
            "options": {
                "stop": STOP_SEQUENCES,
                "temperature": self.config.temperature,
            }
        })
    }

    fn generate_payload(&self, full_prompt: &str) -> Value {
        json!({
            "model": self.config.model,
            "prompt": full_prompt,
            "stream": false,
            "options": {
                "temperature": self.config.temperature,
                "top_p": 0.9,
                "top_k": 40,
                "stop": STOP_SEQUENCES,
            }
        })
    }

    /// Extract an error detail from a non-success response body
    fn error_detail(body: &str) -> String {
        serde_json::from_str::<ApiErrorBody>(body).map_or_else(
            |_| body.chars().take(ERROR_BODY_EXCERPT_CHARS).collect(),
            |parsed| parsed.error,
        )
    }

    // ========================================================================
    // Chat Path
    // ========================================================================

    /// Request a conversation reply from the chat endpoint
    ///
    /// Transport failures are retried up to the configured attempt budget
    /// with a fixed inter-attempt delay. Empty replies, missing models, and
    /// API errors are surfaced immediately.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationError`] describing the terminal failure.
    pub async fn chat(
        &self,
        messages: &[ChatMessage],
        ctx: &CallContext,
    ) -> Result<String, GenerationError> {
        let url = self.api_url("api/chat");
        let payload = self.chat_payload(messages);
        let started = Instant::now();
        let mut last_transport: Option<GenerationError> = None;

        for attempt in 1..=self.config.retry_attempts {
            match self
                .transport
                .post_json(&url, &payload, self.config.chat_timeout)
                .await
            {
                Ok(response) => {
                    return self.finish_chat(&response, messages, ctx, started).await;
                }
                Err(transport_error) => {
                    let failure = GenerationError::from_transport(&transport_error);
                    warn!(
                        "Generation attempt {attempt}/{} failed ({})",
                        self.config.retry_attempts,
                        failure.kind.as_str()
                    );
                    self.record_failure(ctx, started, &failure).await;
                    last_transport = Some(failure);
                    if attempt < self.config.retry_attempts {
                        sleep(self.config.retry_delay).await;
                    }
                }
            }
        }

        let failure = last_transport
            .unwrap_or_else(|| GenerationError::connection("no attempts were made"));
        error!(
            "Generation failed after {} attempts: {failure}",
            self.config.retry_attempts
        );
        Err(failure)
    }

    /// Classify a chat response and record the attempt
    async fn finish_chat(
        &self,
        response: &TransportResponse,
        messages: &[ChatMessage],
        ctx: &CallContext,
        started: Instant,
    ) -> Result<String, GenerationError> {
        let failure = match response.status {
            200 => match serde_json::from_str::<ChatApiResponse>(&response.body) {
                Ok(parsed) => {
                    let reply = parsed.message.content.trim().to_owned();
                    if reply.is_empty() {
                        GenerationError::empty_response()
                    } else {
                        self.record_chat_success(messages, &reply, ctx, started)
                            .await;
                        return Ok(reply);
                    }
                }
                Err(parse_error) => GenerationError::api_error(
                    200,
                    format!("invalid response body: {parse_error}"),
                ),
            },
            404 => GenerationError::model_not_found(&self.config.model),
            status => GenerationError::api_error(status, Self::error_detail(&response.body)),
        };

        error!("Generation call failed: {failure}");
        self.record_failure(ctx, started, &failure).await;
        Err(failure)
    }

    // ========================================================================
    // Generate Path
    // ========================================================================

    /// Request a long-form completion from the generate endpoint
    ///
    /// Used for test-result analyses. Empty replies are retried alongside
    /// transport failures; 404 and other API errors stay terminal.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationError`] describing the terminal failure.
    pub async fn generate(
        &self,
        prompt: &str,
        system_prompt: &str,
        ctx: &CallContext,
    ) -> Result<String, GenerationError> {
        let full_prompt = if system_prompt.is_empty() {
            prompt.to_owned()
        } else {
            format!("{system_prompt}\n\n{prompt}")
        };

        let url = self.api_url("api/generate");
        let payload = self.generate_payload(&full_prompt);
        let started = Instant::now();
        let mut last_error: Option<GenerationError> = None;

        for attempt in 1..=self.config.retry_attempts {
            match self
                .transport
                .post_json(&url, &payload, self.config.generate_timeout)
                .await
            {
                Ok(response) if response.status == 200 => {
                    let reply = serde_json::from_str::<GenerateApiResponse>(&response.body)
                        .map(|parsed| parsed.response.trim().to_owned());
                    match reply {
                        Ok(text) if !text.is_empty() => {
                            self.record_generate_success(&full_prompt, &text, ctx, started)
                                .await;
                            debug!("Generate call succeeded on attempt {attempt}");
                            return Ok(text);
                        }
                        Ok(_) => {
                            let failure = GenerationError::empty_response();
                            warn!("Empty generate reply on attempt {attempt}");
                            self.record_failure(ctx, started, &failure).await;
                            last_error = Some(failure);
                        }
                        Err(parse_error) => {
                            let failure = GenerationError::api_error(
                                200,
                                format!("invalid response body: {parse_error}"),
                            );
                            error!("Generate call failed: {failure}");
                            self.record_failure(ctx, started, &failure).await;
                            return Err(failure);
                        }
                    }
                }
                Ok(response) if response.status == 404 => {
                    let failure = GenerationError::model_not_found(&self.config.model);
                    error!("Generate call failed: {failure}");
                    self.record_failure(ctx, started, &failure).await;
                    return Err(failure);
                }
                Ok(response) => {
                    let failure = GenerationError::api_error(
                        response.status,
                        Self::error_detail(&response.body),
                    );
                    error!("Generate call failed: {failure}");
                    self.record_failure(ctx, started, &failure).await;
                    return Err(failure);
                }
                Err(transport_error) => {
                    let failure = GenerationError::from_transport(&transport_error);
                    warn!(
                        "Generate attempt {attempt}/{} failed ({})",
                        self.config.retry_attempts,
                        failure.kind.as_str()
                    );
                    self.record_failure(ctx, started, &failure).await;
                    last_error = Some(failure);
                }
            }

            if attempt < self.config.retry_attempts {
                sleep(self.config.retry_delay).await;
            }
        }

        let failure =
            last_error.unwrap_or_else(|| GenerationError::connection("no attempts were made"));
        error!(
            "Generate failed after {} attempts: {failure}",
            self.config.retry_attempts
        );
        Err(failure)
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    /// Best-effort connectivity probe against the generation service
    ///
    /// Never fails; problems are collected into the report's error list.
    pub async fn probe(&self) -> ConnectivityReport {
        let mut report = ConnectivityReport {
            base_url: self.config.base_url.clone(),
            model: self.config.model.clone(),
            model_loaded: false,
            chat_api_working: false,
            generate_api_working: false,
            chat_response: String::new(),
            generate_response: String::new(),
            errors: Vec::new(),
        };

        self.probe_tags(&mut report).await;
        self.probe_chat(&mut report).await;
        self.probe_generate(&mut report).await;

        report
    }

    async fn probe_tags(&self, report: &mut ConnectivityReport) {
        match self
            .transport
            .get(&self.api_url("api/tags"), self.config.probe_timeout)
            .await
        {
            Ok(response) if response.status == 200 => {
                let names: Vec<String> = serde_json::from_str::<TagsResponse>(&response.body)
                    .map(|tags| tags.models.into_iter().map(|m| m.name).collect())
                    .unwrap_or_default();
                report.model_loaded = names.iter().any(|name| name == &self.config.model);
                if !report.model_loaded {
                    report.errors.push(format!(
                        "Model {} is not loaded. Available models: {names:?}",
                        self.config.model
                    ));
                }
            }
            Ok(response) => report
                .errors
                .push(format!("Model listing error: HTTP {}", response.status)),
            Err(transport_error) => report
                .errors
                .push(format!("Connection error: {transport_error}")),
        }
    }

    async fn probe_chat(&self, report: &mut ConnectivityReport) {
        let payload = self.chat_payload(&[ChatMessage::user("Reply briefly: can you hear me?")]);
        match self
            .transport
            .post_json(&self.api_url("api/chat"), &payload, self.config.probe_timeout)
            .await
        {
            Ok(response) if response.status == 200 => {
                report.chat_api_working = true;
                if let Ok(parsed) = serde_json::from_str::<ChatApiResponse>(&response.body) {
                    report.chat_response = parsed.message.content;
                }
            }
            Ok(response) => report.errors.push(format!(
                "Chat API error: {} - {}",
                response.status,
                Self::error_detail(&response.body)
            )),
            Err(transport_error) => report
                .errors
                .push(format!("Chat API error: {transport_error}")),
        }
    }

    async fn probe_generate(&self, report: &mut ConnectivityReport) {
        let payload = self.generate_payload("Reply briefly: can you hear me?");
        match self
            .transport
            .post_json(
                &self.api_url("api/generate"),
                &payload,
                self.config.probe_timeout,
            )
            .await
        {
            Ok(response) if response.status == 200 => {
                report.generate_api_working = true;
                if let Ok(parsed) = serde_json::from_str::<GenerateApiResponse>(&response.body) {
                    report.generate_response = parsed.response;
                }
            }
            Ok(response) => report.errors.push(format!(
                "Generate API error: {} - {}",
                response.status,
                Self::error_detail(&response.body)
            )),
            Err(transport_error) => report
                .errors
                .push(format!("Generate API error: {transport_error}")),
        }
    }

    // ========================================================================
    // Telemetry
    // ========================================================================

    async fn record_chat_success(
        &self,
        messages: &[ChatMessage],
        reply: &str,
        ctx: &CallContext,
        started: Instant,
    ) {
        let prompt_text: String = messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        self.record_success(&prompt_text, reply, ctx, started).await;
    }

    async fn record_generate_success(
        &self,
        full_prompt: &str,
        reply: &str,
        ctx: &CallContext,
        started: Instant,
    ) {
        self.record_success(full_prompt, reply, ctx, started).await;
    }

    async fn record_success(
        &self,
        prompt_text: &str,
        reply: &str,
        ctx: &CallContext,
        started: Instant,
    ) {
        let prompt_tokens = estimate_tokens(prompt_text);
        let completion_tokens = estimate_tokens(reply);

        self.telemetry
            .record_generation(GenerationRecord {
                user_id: ctx.user_id.clone(),
                endpoint: ctx.endpoint.clone(),
                model: self.config.model.clone(),
                prompt_tokens: Some(prompt_tokens),
                completion_tokens: Some(completion_tokens),
                total_tokens: Some(prompt_tokens + completion_tokens),
                response_time_ms: started.elapsed().as_secs_f64() * 1000.0,
                temperature: Some(self.config.temperature),
                success: true,
                error_message: None,
            })
            .await;
    }

    async fn record_failure(&self, ctx: &CallContext, started: Instant, error: &GenerationError) {
        self.telemetry
            .record_generation(GenerationRecord {
                user_id: ctx.user_id.clone(),
                endpoint: ctx.endpoint.clone(),
                model: self.config.model.clone(),
                prompt_tokens: None,
                completion_tokens: None,
                total_tokens: None,
                response_time_ms: started.elapsed().as_secs_f64() * 1000.0,
                temperature: Some(self.config.temperature),
                success: false,
                error_message: Some(error.to_string()),
            })
            .await;
    }
}
