// ABOUTME: User profile route handlers
// ABOUTME: Read and update the authenticated user's own profile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Echo Platform

//! User profile routes

use axum::{
    extract::State,
    http::HeaderMap,
    routing::{get, patch},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use super::auth::UserInfo;
use crate::resources::ServerResources;
use echo_core::{AppError, AppResult};

/// Profile update request; absent fields are left untouched
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    /// New display name
    #[serde(default)]
    pub display_name: Option<String>,
    /// New contact email
    #[serde(default)]
    pub email: Option<String>,
}

/// User profile routes handler
pub struct UserRoutes;

impl UserRoutes {
    /// Create all user profile routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/users/me", get(Self::me))
            .route("/api/users/me", patch(Self::update_me))
            .with_state(resources)
    }

    /// Profile of the authenticated user
    async fn me(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> AppResult<Json<UserInfo>> {
        let user = super::authenticate(&headers, &resources).await?;
        Ok(Json(user.into()))
    }

    /// Update profile fields of the authenticated user
    async fn update_me(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<UpdateProfileRequest>,
    ) -> AppResult<Json<UserInfo>> {
        let user = super::authenticate(&headers, &resources).await?;

        let updated = resources
            .database
            .users()
            .update_profile(
                &user.id,
                request.display_name.as_deref(),
                request.email.as_deref(),
            )
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        Ok(Json(updated.into()))
    }
}
