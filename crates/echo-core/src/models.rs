// ABOUTME: Domain enums for the Echo support platform backend
// ABOUTME: Conversation modes and psychological test types with parsing and limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Echo Platform

//! Domain enums shared across the server crate
//!
//! These types select prompt instructions, storage buckets, and validation
//! limits; they are serialized in lowercase in both the API and the store.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;

/// Conversation personas available in the system
///
/// The mode selects the system-prompt persona and the storage bucket a turn
/// is written to. Diary is append-only and never calls the generation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationMode {
    /// Reflective, supportive listener persona
    Empathetic,
    /// Concrete, bullet-point advisor persona
    Practical,
    /// Append-only personal journal (no generated replies)
    Diary,
}

impl ConversationMode {
    /// String representation used in the API and the store
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Empathetic => "empathetic",
            Self::Practical => "practical",
            Self::Diary => "diary",
        }
    }

    /// Maximum accepted message length for this mode, in characters
    #[must_use]
    pub const fn max_message_chars(self) -> usize {
        match self {
            Self::Empathetic | Self::Practical => 2000,
            Self::Diary => 10_000,
        }
    }

    /// Whether this mode produces generated replies
    #[must_use]
    pub const fn generates_replies(self) -> bool {
        !matches!(self, Self::Diary)
    }
}

impl fmt::Display for ConversationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConversationMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "empathetic" => Ok(Self::Empathetic),
            "practical" => Ok(Self::Practical),
            "diary" => Ok(Self::Diary),
            other => Err(AppError::invalid_input(format!(
                "Unknown conversation mode: {other}"
            ))),
        }
    }
}

/// Psychological self-report test types available in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestType {
    /// Adult ADHD Self-Report Scale v1.1 (6 + 12 questions, answers 0-4)
    Asrs,
    /// Generalized Anxiety Disorder 7 (7 questions, answers 0-3)
    Gad7,
    /// Patient Health Questionnaire 9 (9 questions, answers 0-3)
    Phq9,
}

impl TestType {
    /// String representation used in the API and the store
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asrs => "asrs",
            Self::Gad7 => "gad7",
            Self::Phq9 => "phq9",
        }
    }

    /// Maximum valid answer value for this test type
    #[must_use]
    pub const fn max_answer_value(self) -> i64 {
        match self {
            Self::Asrs => 4,
            Self::Gad7 | Self::Phq9 => 3,
        }
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asrs" => Ok(Self::Asrs),
            "gad7" => Ok(Self::Gad7),
            "phq9" => Ok(Self::Phq9),
            other => Err(AppError::invalid_input(format!(
                "Unknown test type: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_round_trip() {
        for mode in [
            ConversationMode::Empathetic,
            ConversationMode::Practical,
            ConversationMode::Diary,
        ] {
            assert_eq!(mode.as_str().parse::<ConversationMode>().ok(), Some(mode));
        }
        assert!("philosophical".parse::<ConversationMode>().is_err());
    }

    #[test]
    fn test_mode_limits() {
        assert_eq!(ConversationMode::Empathetic.max_message_chars(), 2000);
        assert_eq!(ConversationMode::Practical.max_message_chars(), 2000);
        assert_eq!(ConversationMode::Diary.max_message_chars(), 10_000);
        assert!(!ConversationMode::Diary.generates_replies());
    }

    #[test]
    fn test_test_type_parsing() {
        assert_eq!("gad7".parse::<TestType>().ok(), Some(TestType::Gad7));
        assert_eq!(TestType::Asrs.max_answer_value(), 4);
        assert_eq!(TestType::Phq9.max_answer_value(), 3);
        assert!("mmpi".parse::<TestType>().is_err());
    }
}
