// ABOUTME: Configuration module for pierre-intelligence crate
// ABOUTME: Re-exports intelligence configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Intelligence module configuration (recommendations, performance, goals, etc.)
pub mod intelligence;

pub use intelligence::IntelligenceConfig;
