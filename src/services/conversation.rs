// ABOUTME: Conversation orchestrator for the empathetic, practical, and diary modes
// ABOUTME: Validates input, persists turns, and drives the generation client with a rolling window
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Echo Platform

//! Conversation orchestration
//!
//! One call per inbound message: validate, persist the user's turn, fetch
//! the rolling context window, request a reply, persist it. Diary mode is
//! append-only and never touches the generation client. The sequence is not
//! transactional: an inbound turn can outlive a failed generation call.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

use crate::database::{Database, TurnRecord};
use crate::llm::{prompts, CallContext, ChatMessage, GenerationClient, GenerationErrorKind};
use echo_core::models::ConversationMode;
use echo_core::{AppError, AppResult};

/// Number of prior turns included in the generation context
const CONTEXT_WINDOW: i64 = 5;

/// History read limits: requests outside [1, `MAX`] are clamped
const HISTORY_LIMIT_MAX: i64 = 1000;
const HISTORY_LIMIT_FALLBACK: i64 = 10;

/// Per-user conversation counts across all modes
#[derive(Debug, Serialize, Deserialize)]
pub struct ConversationStats {
    /// User the stats belong to
    pub user_id: String,
    /// Turns in the empathetic bucket
    pub empathetic_messages: i64,
    /// Turns in the practical bucket
    pub practical_messages: i64,
    /// Entries in the diary bucket
    pub diary_entries: i64,
    /// Sum of the above
    pub total_messages: i64,
}

/// Conversation orchestrator
pub struct ConversationService {
    database: Database,
    generation: Arc<GenerationClient>,
}

impl ConversationService {
    /// Create a new conversation service
    #[must_use]
    pub fn new(database: Database, generation: Arc<GenerationClient>) -> Self {
        Self {
            database,
            generation,
        }
    }

    /// Handle one inbound message in a reply-generating mode
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for empty or over-length text and for diary
    /// mode (which has no replies), `ExternalServiceUnavailable` when the
    /// generation client fails, or a database error.
    pub async fn send_message(
        &self,
        user_id: &str,
        mode: ConversationMode,
        text: &str,
    ) -> AppResult<String> {
        Self::validate_text(mode, text)?;

        let Some(system_prompt) = prompts::persona(mode) else {
            return Err(AppError::invalid_input(
                "Diary mode does not generate replies",
            ));
        };

        let conversations = self.database.conversations();
        conversations
            .insert_turn(user_id, mode, text, true)
            .await?;
        info!("Saved inbound message for user {user_id} in mode {mode}");

        let recent = conversations
            .recent_turns(user_id, mode, CONTEXT_WINDOW)
            .await?;
        let messages = Self::build_messages(system_prompt, &recent, text);

        let ctx = CallContext::for_user(user_id, mode.as_str());
        let reply = match self.generation.chat(&messages, &ctx).await {
            Ok(reply) => reply,
            Err(generation_error) => {
                if generation_error.kind == GenerationErrorKind::ModelNotFound {
                    // Best-effort diagnostics; the probe itself never fails.
                    let report = self.generation.probe().await;
                    error!("Generation service diagnostics: {report:?}");
                }
                return Err(generation_error.into());
            }
        };

        conversations
            .insert_turn(user_id, mode, &reply, false)
            .await?;
        info!("Saved generated reply for user {user_id} in mode {mode}");

        Ok(reply)
    }

    /// Append a diary entry (no generated reply)
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for empty or over-length text, or a database
    /// error.
    pub async fn append_diary(&self, user_id: &str, text: &str) -> AppResult<TurnRecord> {
        Self::validate_text(ConversationMode::Diary, text)?;

        let entry = self
            .database
            .conversations()
            .insert_turn(user_id, ConversationMode::Diary, text, true)
            .await?;
        info!("Saved diary entry for user {user_id}");

        Ok(entry)
    }

    /// Chronological history for (user, mode) with a clamped limit
    ///
    /// # Errors
    ///
    /// Returns a database error if the read fails.
    pub async fn history(
        &self,
        user_id: &str,
        mode: ConversationMode,
        limit: i64,
    ) -> AppResult<Vec<TurnRecord>> {
        let limit = if limit > HISTORY_LIMIT_MAX {
            HISTORY_LIMIT_MAX
        } else if limit < 1 {
            HISTORY_LIMIT_FALLBACK
        } else {
            limit
        };

        self.database
            .conversations()
            .recent_turns(user_id, mode, limit)
            .await
    }

    /// Per-mode message counts for a user
    ///
    /// # Errors
    ///
    /// Returns a database error if any count fails.
    pub async fn stats(&self, user_id: &str) -> AppResult<ConversationStats> {
        let conversations = self.database.conversations();
        let empathetic = conversations
            .count_turns(user_id, ConversationMode::Empathetic)
            .await?;
        let practical = conversations
            .count_turns(user_id, ConversationMode::Practical)
            .await?;
        let diary = conversations
            .count_turns(user_id, ConversationMode::Diary)
            .await?;

        Ok(ConversationStats {
            user_id: user_id.to_owned(),
            empathetic_messages: empathetic,
            practical_messages: practical,
            diary_entries: diary,
            total_messages: empathetic + practical + diary,
        })
    }

    /// Reject empty and over-length text before any side effect happens
    fn validate_text(mode: ConversationMode, text: &str) -> AppResult<()> {
        if text.trim().is_empty() {
            return Err(AppError::invalid_input("Message must not be empty"));
        }

        let max_chars = mode.max_message_chars();
        if text.chars().count() > max_chars {
            return Err(AppError::invalid_input(format!(
                "Message is too long. Max. {max_chars} characters"
            )));
        }

        Ok(())
    }

    /// Assemble the role-tagged message list for the generation client
    fn build_messages(
        system_prompt: &str,
        recent: &[TurnRecord],
        text: &str,
    ) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(recent.len() + 2);
        messages.push(ChatMessage::system(system_prompt));

        for turn in recent {
            if turn.is_user_message {
                messages.push(ChatMessage::user(&turn.message));
            } else {
                messages.push(ChatMessage::assistant(&turn.message));
            }
        }

        messages.push(ChatMessage::user(text));
        messages
    }
}
