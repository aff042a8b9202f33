// ABOUTME: Structured error types for fitness provider operations re-exported from pierre-core
// ABOUTME: Provides domain-specific errors with retry information and rate limit handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use pierre_core::errors::provider::*;
