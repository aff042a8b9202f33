// ABOUTME: AI coach management tools for personalized training guidance.
// ABOUTME: Implements list_coaches, create_coach, get_coach, update_coach, etc.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # AI Coach Management Tools
//!
//! This module will contain tools for AI coach management:
//! - `list_coaches` - List available coaches
//! - `create_coach` - Create a custom coach
//! - `get_coach` - Get coach details
//! - `update_coach` - Update coach settings
//! - `delete_coach` - Delete a coach
//! - `toggle_coach_favorite` - Toggle favorite status
//! - `search_coaches` - Search coaches
//! - `activate_coach` - Activate a coach
//! - `deactivate_coach` - Deactivate the active coach
//! - `get_active_coach` - Get currently active coach
//! - `hide_coach` - Hide a coach from listings
//! - `show_coach` - Show a hidden coach
//! - `list_hidden_coaches` - List hidden coaches
//!
//! Implementation will be added in Phase 5.
