// ABOUTME: Test submission orchestrator for the ASRS, GAD-7 and PHQ-9 questionnaires
// ABOUTME: Validates answers, scores, requests a narrative analysis, and persists the result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Echo Platform

//! Psychological test submission orchestration
//!
//! A submission is validated and scored before anything else happens; the
//! narrative analysis is requested from the generation service afterwards
//! and deliberately non-fatal — if generation fails, the submission still
//! succeeds with the bare interpretation label as its analysis.

use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info};

use crate::database::{Database, TestRecord};
use crate::llm::{prompts, CallContext, GenerationClient};
use echo_core::models::TestType;
use echo_core::scoring::{self, TestScore};
use echo_core::{AppError, AppResult};

/// Telemetry endpoint name for analysis generation calls
const ANALYSIS_ENDPOINT: &str = "test_analysis";

/// History read limits, mirroring the conversation history clamp
const HISTORY_LIMIT_MAX: i64 = 100;
const HISTORY_LIMIT_FALLBACK: i64 = 10;

/// Validated answer vectors for one submission
#[derive(Debug, Clone)]
pub enum TestAnswers {
    /// ASRS v1.1: six part-A and twelve part-B answers, each 0-4
    Asrs {
        /// Part A screener answers
        part_a: Vec<i64>,
        /// Part B follow-up answers
        part_b: Vec<i64>,
    },
    /// GAD-7: seven answers, each 0-3
    Gad7 {
        /// Questionnaire answers
        answers: Vec<i64>,
    },
    /// PHQ-9: nine answers, each 0-3
    Phq9 {
        /// Questionnaire answers
        answers: Vec<i64>,
    },
}

impl TestAnswers {
    /// Test type these answers belong to
    #[must_use]
    pub const fn test_type(&self) -> TestType {
        match self {
            Self::Asrs { .. } => TestType::Asrs,
            Self::Gad7 { .. } => TestType::Gad7,
            Self::Phq9 { .. } => TestType::Phq9,
        }
    }

    /// JSON shape persisted alongside the submission
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Asrs { part_a, part_b } => json!({"part_a": part_a, "part_b": part_b}),
            Self::Gad7 { answers } | Self::Phq9 { answers } => json!({"answers": answers}),
        }
    }
}

/// Test submission orchestrator
pub struct TestService {
    database: Database,
    generation: Arc<GenerationClient>,
}

impl TestService {
    /// Create a new test service
    #[must_use]
    pub fn new(database: Database, generation: Arc<GenerationClient>) -> Self {
        Self {
            database,
            generation,
        }
    }

    /// Handle one test submission
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for wrong-length or out-of-range answers, or a
    /// database error. Generation failures never fail the submission.
    pub async fn submit(&self, user_id: &str, answers: &TestAnswers) -> AppResult<TestRecord> {
        Self::validate(answers)?;

        let score = Self::score(answers);
        let prompt = Self::analysis_prompt(answers, score);

        let ctx = CallContext::for_user(user_id, ANALYSIS_ENDPOINT);
        let analysis = match self
            .generation
            .generate(&prompt, prompts::SYSTEM_PROMPT_ANALYSIS, &ctx)
            .await
        {
            Ok(text) => text,
            Err(generation_error) => {
                error!("Failed to generate test analysis: {generation_error}");
                format!(
                    "Could not generate a detailed analysis. Basic interpretation: {}",
                    score.interpretation
                )
            }
        };

        let record = self
            .database
            .psychological_tests()
            .insert(
                user_id,
                answers.test_type(),
                &answers.to_json(),
                score.value,
                score.interpretation,
                &analysis,
            )
            .await?;
        info!(
            "Saved {} submission for user {user_id} (score {:.1})",
            answers.test_type(),
            score.value
        );

        Ok(record)
    }

    /// Paginated submission history, optionally filtered by type
    ///
    /// # Errors
    ///
    /// Returns a database error if the read fails.
    pub async fn history(
        &self,
        user_id: &str,
        test_type: Option<TestType>,
        limit: i64,
        offset: i64,
    ) -> AppResult<(Vec<TestRecord>, i64)> {
        let limit = if limit > HISTORY_LIMIT_MAX {
            HISTORY_LIMIT_MAX
        } else if limit < 1 {
            HISTORY_LIMIT_FALLBACK
        } else {
            limit
        };
        let offset = offset.max(0);

        self.database
            .psychological_tests()
            .history(user_id, test_type, limit, offset)
            .await
    }

    /// One submission owned by the user
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the submission is absent or owned by
    /// another user, or a database error.
    pub async fn get(&self, user_id: &str, test_id: &str) -> AppResult<TestRecord> {
        self.database
            .psychological_tests()
            .get(test_id, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Test submission"))
    }

    /// Reject wrong-length and out-of-range answers before any side effect
    fn validate(answers: &TestAnswers) -> AppResult<()> {
        let test_type = answers.test_type();
        let (expected_a, expected_b) = scoring::expected_lengths(test_type);
        let max_value = test_type.max_answer_value();

        let check_part = |label: &str, values: &[i64], expected_len: usize| -> AppResult<()> {
            if values.len() != expected_len {
                return Err(AppError::invalid_input(format!(
                    "{label} must contain exactly {expected_len} answers"
                )));
            }
            if values.iter().any(|&v| v < 0 || v > max_value) {
                return Err(AppError::invalid_input(format!(
                    "Answers must be in range 0-{max_value}"
                )));
            }
            Ok(())
        };

        match answers {
            TestAnswers::Asrs { part_a, part_b } => {
                check_part("Part A", part_a, expected_a)?;
                check_part("Part B", part_b, expected_b)?;
            }
            TestAnswers::Gad7 { answers } | TestAnswers::Phq9 { answers } => {
                check_part("Answers", answers, expected_a)?;
            }
        }

        Ok(())
    }

    /// Score validated answers
    fn score(answers: &TestAnswers) -> TestScore {
        match answers {
            TestAnswers::Asrs { part_a, part_b } => scoring::score_asrs(part_a, part_b),
            TestAnswers::Gad7 { answers } => scoring::score_gad7(answers),
            TestAnswers::Phq9 { answers } => scoring::score_phq9(answers),
        }
    }

    /// Build the analysis prompt for validated, scored answers
    fn analysis_prompt(answers: &TestAnswers, score: TestScore) -> String {
        match answers {
            TestAnswers::Asrs { part_a, part_b } => prompts::asrs_analysis_prompt(
                part_a,
                part_b,
                score.value,
                score.interpretation,
            ),
            TestAnswers::Gad7 { answers } => {
                prompts::gad7_analysis_prompt(answers, score.value, score.interpretation)
            }
            TestAnswers::Phq9 { answers } => {
                prompts::phq9_analysis_prompt(answers, score.value, score.interpretation)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_valid_vectors() {
        let cases = [
            TestAnswers::Asrs {
                part_a: vec![0, 1, 2, 3, 4, 0],
                part_b: vec![0; 12],
            },
            TestAnswers::Gad7 {
                answers: vec![1, 2, 1, 3, 0, 2, 1],
            },
            TestAnswers::Phq9 {
                answers: vec![2, 1, 3, 2, 1, 0, 2, 1, 0],
            },
        ];
        for answers in cases {
            assert!(TestService::validate(&answers).is_ok());
        }
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        // 4 exceeds the GAD-7 maximum of 3.
        let gad7 = TestAnswers::Gad7 {
            answers: vec![1, 2, 1, 4, 0, 2, 1],
        };
        assert!(TestService::validate(&gad7).is_err());

        let asrs = TestAnswers::Asrs {
            part_a: vec![0, 1, 2, 3, 4, 5],
            part_b: vec![0; 12],
        };
        assert!(TestService::validate(&asrs).is_err());

        let negative = TestAnswers::Phq9 {
            answers: vec![-1, 1, 3, 2, 1, 0, 2, 1, 0],
        };
        assert!(TestService::validate(&negative).is_err());
    }

    #[test]
    fn test_validate_rejects_wrong_lengths() {
        let short_gad7 = TestAnswers::Gad7 {
            answers: vec![1, 2, 1],
        };
        assert!(TestService::validate(&short_gad7).is_err());

        let short_part_b = TestAnswers::Asrs {
            part_a: vec![0; 6],
            part_b: vec![0; 11],
        };
        assert!(TestService::validate(&short_part_b).is_err());
    }

    #[test]
    fn test_answers_json_shapes() {
        let asrs = TestAnswers::Asrs {
            part_a: vec![1; 6],
            part_b: vec![0; 12],
        };
        assert!(asrs.to_json().get("part_a").is_some());

        let gad7 = TestAnswers::Gad7 {
            answers: vec![0; 7],
        };
        assert!(gad7.to_json().get("answers").is_some());
    }
}
