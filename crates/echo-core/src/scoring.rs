// ABOUTME: Pure scorers for the ASRS, GAD-7 and PHQ-9 self-report questionnaires
// ABOUTME: Maps validated answer vectors to a numeric score and an interpretation label
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Echo Platform

//! Fixed-formula scoring for the supported screening questionnaires
//!
//! All scorers are pure and deterministic: the same answers always produce
//! the same score and label. Callers validate answer length and range before
//! invoking these functions; out-of-range values are rejected upstream.
//!
//! Interpretation thresholds follow the published scoring guides:
//! GAD-7 buckets at 4/9/14, PHQ-9 buckets at 4/9/14/19, ASRS part-A screen
//! at four or more answers of "often"/"very often" (value >= 3).

use crate::models::TestType;

/// Answers scored as "often" or "very often" on the ASRS 0-4 scale
const ASRS_FREQUENT_THRESHOLD: i64 = 3;

/// Number of frequent part-A answers that flags elevated ADHD risk
const ASRS_PART_A_POSITIVE: usize = 4;

/// Result of scoring one questionnaire submission
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestScore {
    /// Numeric score (sum for GAD-7/PHQ-9, percentage of maximum for ASRS)
    pub value: f64,
    /// Categorical interpretation label
    pub interpretation: &'static str,
}

/// Score an ASRS v1.1 submission
///
/// `part_a` holds the six screener questions, `part_b` the twelve follow-up
/// questions, each answered on a 0-4 frequency scale. The interpretation is
/// driven by part A alone; the numeric score is the raw total expressed as a
/// percentage of the maximum possible total.
#[must_use]
pub fn score_asrs(part_a: &[i64], part_b: &[i64]) -> TestScore {
    let max_possible = (part_a.len() + part_b.len()) * 4;
    if max_possible == 0 {
        return TestScore {
            value: 0.0,
            interpretation: "no answers to analyze",
        };
    }

    let frequent_a = part_a
        .iter()
        .filter(|&&answer| answer >= ASRS_FREQUENT_THRESHOLD)
        .count();
    let total: i64 = part_a.iter().sum::<i64>() + part_b.iter().sum::<i64>();

    let interpretation = if frequent_a >= ASRS_PART_A_POSITIVE {
        "high ADHD risk"
    } else {
        "low ADHD risk"
    };

    TestScore {
        value: total as f64 / max_possible as f64 * 100.0,
        interpretation,
    }
}

/// Score a GAD-7 submission (seven answers on a 0-3 scale, total 0-21)
#[must_use]
pub fn score_gad7(answers: &[i64]) -> TestScore {
    let total: i64 = answers.iter().sum();

    let interpretation = match total {
        ..=4 => "minimal anxiety",
        5..=9 => "mild anxiety",
        10..=14 => "moderate anxiety",
        _ => "severe anxiety",
    };

    TestScore {
        value: total as f64,
        interpretation,
    }
}

/// Score a PHQ-9 submission (nine answers on a 0-3 scale, total 0-27)
#[must_use]
pub fn score_phq9(answers: &[i64]) -> TestScore {
    let total: i64 = answers.iter().sum();

    let interpretation = match total {
        ..=4 => "no depression symptoms",
        5..=9 => "mild depression",
        10..=14 => "moderate depression",
        15..=19 => "moderately severe depression",
        _ => "severe depression",
    };

    TestScore {
        value: total as f64,
        interpretation,
    }
}

/// Expected answer-vector shape for a test type, `(part_a_len, part_b_len)`
///
/// GAD-7 and PHQ-9 have a single part; their second length is zero.
#[must_use]
pub const fn expected_lengths(test_type: TestType) -> (usize, usize) {
    match test_type {
        TestType::Asrs => (6, 12),
        TestType::Gad7 => (7, 0),
        TestType::Phq9 => (9, 0),
    }
}
