// ABOUTME: Connection management tools for provider OAuth flows.
// ABOUTME: Implements connect_provider, get_connection_status, disconnect_provider.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Connection Management Tools
//!
//! This module will contain tools for managing provider connections:
//! - `connect_provider` - Initiate OAuth flow
//! - `get_connection_status` - Check provider connection status
//! - `disconnect_provider` - Disconnect and revoke OAuth tokens
//!
//! Implementation will be added in Phase 2.
