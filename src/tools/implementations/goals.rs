// ABOUTME: Goal management tools for setting and tracking fitness goals.
// ABOUTME: Implements set_goal, track_progress, suggest_goals, analyze_goal_feasibility.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Goal Management Tools
//!
//! This module will contain tools for goal management:
//! - `set_goal` - Create a new fitness goal
//! - `track_progress` - Track progress toward goals
//! - `suggest_goals` - AI-powered goal suggestions
//! - `analyze_goal_feasibility` - Assess goal achievability
//!
//! Implementation will be added in Phase 5.
