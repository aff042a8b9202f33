// ABOUTME: Test utilities and helper functions for A2A module testing
// ABOUTME: Provides common test setup, client creation, and database utilities for A2A tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Test utilities for A2A module
//!
//! Common functions to reduce code duplication in A2A tests

use crate::database_plugins::factory::Database;
use std::sync::Arc;


