// ABOUTME: Shared server resources handed to every route group
// ABOUTME: Database handle, auth manager, generation client, and configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Echo Platform

//! Shared server resources
//!
//! One `Arc<ServerResources>` is built at startup and cloned into every
//! route group as axum state. There is no other process-global state.

use std::sync::Arc;

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::Database;
use crate::llm::GenerationClient;

/// Everything a route handler needs, bundled behind one `Arc`
pub struct ServerResources {
    /// Database handle (cheap to clone into managers)
    pub database: Database,
    /// JWT and password authority
    pub auth: AuthManager,
    /// Client for the external generation service
    pub generation: Arc<GenerationClient>,
    /// Resolved configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Bundle the server's shared resources
    #[must_use]
    pub fn new(
        database: Database,
        auth: AuthManager,
        generation: Arc<GenerationClient>,
        config: Arc<ServerConfig>,
    ) -> Self {
        Self {
            database,
            auth,
            generation,
            config,
        }
    }
}
