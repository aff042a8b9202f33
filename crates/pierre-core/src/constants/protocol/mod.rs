// ABOUTME: Protocol-related constants for MCP and JSON-RPC communication
// ABOUTME: Handles protocol versioning and server identification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Protocol constants module

/// Protocol version and identification constants
pub mod constants;

// Re-export all protocol constants

/// Re-export all protocol constants
pub use constants::*;
