// ABOUTME: Analytics tools for fitness data analysis and trend detection.
// ABOUTME: Implements analyze_activity, calculate_metrics, analyze_performance_trends.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Analytics Tools
//!
//! This module will contain tools for fitness analytics:
//! - `analyze_activity` - Deep activity analysis
//! - `calculate_metrics` - Compute fitness metrics
//! - `analyze_performance_trends` - Trend analysis
//! - `compare_activities` - Activity comparison
//! - `detect_patterns` - Pattern detection
//!
//! Implementation will be added in Phase 4.
