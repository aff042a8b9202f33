// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports command modules for pierre-cli
// ABOUTME: Provides access to token and user management commands

pub mod token;
pub mod user;
