// ABOUTME: Core types and constants for the Echo support platform backend
// ABOUTME: Foundation crate with error types, domain enums, and test scoring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Echo Platform

//! # Echo Core
//!
//! Foundation crate for the Echo support-platform backend. Holds the types
//! shared between the server crate and its tests:
//!
//! - [`errors`]: unified `AppError` / `ErrorCode` with HTTP status mapping
//! - [`models`]: domain enums (conversation modes, test types)
//! - [`scoring`]: pure scorers for the ASRS, GAD-7 and PHQ-9 questionnaires

pub mod errors;
pub mod models;
pub mod scoring;

pub use errors::{AppError, AppResult, ErrorCode, ErrorResponse};
pub use models::{ConversationMode, TestType};
pub use scoring::TestScore;
