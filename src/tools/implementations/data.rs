// ABOUTME: Data access tools for retrieving fitness data from providers.
// ABOUTME: Implements get_activities, get_athlete, get_stats, get_activity_intelligence.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Access Tools
//!
//! This module will contain tools for accessing fitness data:
//! - `get_activities` - Retrieve activities
//! - `get_athlete` - Get athlete profile
//! - `get_stats` - Get aggregated statistics
//! - `get_activity_intelligence` - Get AI-powered activity insights
//!
//! Implementation will be added in Phase 3.
