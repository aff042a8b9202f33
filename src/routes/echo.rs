// ABOUTME: Conversation route handlers for the empathetic, practical, and diary modes
// ABOUTME: Send, history, stats, and generation-service diagnostics endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Echo Platform

//! Conversation routes
//!
//! All handlers require JWT authentication and delegate to
//! [`ConversationService`]; the two reply-generating modes share one code
//! path, the diary endpoint is a plain append.

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::database::TurnRecord;
use crate::llm::ConnectivityReport;
use crate::resources::ServerResources;
use crate::services::{ConversationService, ConversationStats};
use echo_core::models::ConversationMode;
use echo_core::AppResult;

/// Request body for all send endpoints
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    /// Message or diary entry text
    pub text: String,
}

/// Reply from a generating mode
#[derive(Debug, Serialize, Deserialize)]
pub struct SendMessageResponse {
    /// Generated reply text
    pub reply: String,
}

/// Persisted diary entry view
#[derive(Debug, Serialize, Deserialize)]
pub struct DiaryEntryResponse {
    /// Entry ID
    pub id: String,
    /// Entry text
    pub content: String,
    /// Creation timestamp
    pub created_at: String,
}

/// Confirmation for a stored diary entry
#[derive(Debug, Serialize, Deserialize)]
pub struct DiaryResponse {
    /// Human-readable confirmation
    pub message: String,
    /// The stored entry
    pub entry: DiaryEntryResponse,
}

/// One turn in a history response
#[derive(Debug, Serialize, Deserialize)]
pub struct TurnResponse {
    /// Message text
    pub message: String,
    /// True for user-authored turns
    pub is_user_message: bool,
    /// Creation timestamp
    pub created_at: String,
}

impl From<TurnRecord> for TurnResponse {
    fn from(turn: TurnRecord) -> Self {
        Self {
            message: turn.message,
            is_user_message: turn.is_user_message,
            created_at: turn.created_at,
        }
    }
}

/// History response with its entry count
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    /// Turns in chronological order
    pub history: Vec<TurnResponse>,
    /// Number of returned turns
    pub count: usize,
}

/// Query parameters for history reads
#[derive(Debug, Deserialize, Default)]
pub struct HistoryQuery {
    /// Maximum number of turns to return (clamped to [1, 1000])
    #[serde(default = "default_history_limit")]
    pub limit: i64,
}

const fn default_history_limit() -> i64 {
    100
}

/// Conversation routes handler
pub struct EchoRoutes;

impl EchoRoutes {
    /// Create all conversation routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/echo/empathetic/send", post(Self::send_empathetic))
            .route("/api/echo/practical/send", post(Self::send_practical))
            .route("/api/echo/diary/send", post(Self::send_diary))
            .route("/api/echo/:mode/history", get(Self::history))
            .route("/api/echo/stats", get(Self::stats))
            .route("/api/echo/diagnostics", get(Self::diagnostics))
            .with_state(resources)
    }

    fn service(resources: &Arc<ServerResources>) -> ConversationService {
        ConversationService::new(resources.database.clone(), resources.generation.clone())
    }

    /// Shared path for the two reply-generating modes
    async fn send_in_mode(
        resources: &Arc<ServerResources>,
        headers: &HeaderMap,
        mode: ConversationMode,
        text: &str,
    ) -> AppResult<Json<SendMessageResponse>> {
        let user = super::authenticate(headers, resources).await?;
        let reply = Self::service(resources)
            .send_message(&user.id, mode, text)
            .await?;
        Ok(Json(SendMessageResponse { reply }))
    }

    /// Send a message in the empathetic mode
    async fn send_empathetic(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<SendMessageRequest>,
    ) -> AppResult<Json<SendMessageResponse>> {
        Self::send_in_mode(&resources, &headers, ConversationMode::Empathetic, &request.text).await
    }

    /// Send a message in the practical mode
    async fn send_practical(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<SendMessageRequest>,
    ) -> AppResult<Json<SendMessageResponse>> {
        Self::send_in_mode(&resources, &headers, ConversationMode::Practical, &request.text).await
    }

    /// Append a diary entry
    async fn send_diary(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<SendMessageRequest>,
    ) -> AppResult<Json<DiaryResponse>> {
        let user = super::authenticate(&headers, &resources).await?;
        let entry = Self::service(&resources)
            .append_diary(&user.id, &request.text)
            .await?;

        Ok(Json(DiaryResponse {
            message: "Entry saved successfully".to_owned(),
            entry: DiaryEntryResponse {
                id: entry.id,
                content: entry.message,
                created_at: entry.created_at,
            },
        }))
    }

    /// Chronological history for one mode
    async fn history(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(mode): Path<String>,
        Query(query): Query<HistoryQuery>,
    ) -> AppResult<Json<HistoryResponse>> {
        let user = super::authenticate(&headers, &resources).await?;
        let mode: ConversationMode = mode.parse()?;

        let turns = Self::service(&resources)
            .history(&user.id, mode, query.limit)
            .await?;
        let history: Vec<TurnResponse> = turns.into_iter().map(TurnResponse::from).collect();
        let count = history.len();

        Ok(Json(HistoryResponse { history, count }))
    }

    /// Per-mode message counts for the authenticated user
    async fn stats(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> AppResult<Json<ConversationStats>> {
        let user = super::authenticate(&headers, &resources).await?;
        let stats = Self::service(&resources).stats(&user.id).await?;
        Ok(Json(stats))
    }

    /// Connectivity probe against the generation service
    async fn diagnostics(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> AppResult<Json<ConnectivityReport>> {
        super::authenticate(&headers, &resources).await?;
        let report = resources.generation.probe().await;
        Ok(Json(report))
    }
}
