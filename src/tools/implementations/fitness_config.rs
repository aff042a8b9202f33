// ABOUTME: Fitness configuration tools for user training preferences.
// ABOUTME: Implements get_fitness_config, set_fitness_config, list_fitness_configs.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Fitness Configuration Tools
//!
//! This module will contain tools for fitness configuration:
//! - `get_fitness_config` - Get user's fitness configuration
//! - `set_fitness_config` - Update fitness configuration
//! - `list_fitness_configs` - List available configurations
//! - `delete_fitness_config` - Remove a configuration
//!
//! Implementation will be added in Phase 5.
