// ABOUTME: Admin authentication and authorization types for pierre-core
// ABOUTME: Tokens, permissions, and audit types used by DatabaseProvider trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Admin data models (tokens, permissions, usage)
pub mod models;
