// ABOUTME: Orchestration services sitting between routes and the database/generation layers
// ABOUTME: Conversation handling and psychological test submission flows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Echo Platform

//! Orchestration services
//!
//! Route handlers stay thin; these services carry the multi-step flows:
//! validate input, talk to the store, call the generation client, persist
//! the outcome.

mod conversation;
mod psychological_tests;

pub use conversation::{ConversationService, ConversationStats};
pub use psychological_tests::{TestAnswers, TestService};
