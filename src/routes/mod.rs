// ABOUTME: Route module organization for the Echo server HTTP endpoints
// ABOUTME: Domain route groups, the shared bearer-token authenticator, and router assembly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Echo Platform

//! Route modules for the Echo server
//!
//! Routes are organized by domain; handlers stay thin and delegate to the
//! service layer. Every group receives the shared [`ServerResources`] as
//! axum state.

/// Authentication routes (register, login, refresh)
pub mod auth;
/// Conversation routes (send, history, stats, diagnostics)
pub mod echo;
/// Health check routes
pub mod health;
/// Psychological test routes (submit, history, results, questions)
pub mod tests;
/// User profile routes
pub mod users;

pub use auth::AuthRoutes;
pub use echo::EchoRoutes;
pub use health::HealthRoutes;
pub use tests::TestRoutes;
pub use users::UserRoutes;

use axum::http::HeaderMap;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::auth::SCOPE_ACCESS;
use crate::database::UserRecord;
use crate::middleware;
use crate::resources::ServerResources;
use echo_core::{AppError, AppResult};

/// Maximum accepted request body size
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Resolve the authenticated user from the `Authorization` header
///
/// # Errors
///
/// Returns a 401-mapped error when the header is missing, the token is not
/// an access token, the user is unknown, or the account is deactivated.
pub(crate) async fn authenticate(
    headers: &HeaderMap,
    resources: &Arc<ServerResources>,
) -> AppResult<UserRecord> {
    let header = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .ok_or_else(AppError::auth_required)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::auth_invalid("Missing bearer token"))?;

    let username = resources.auth.validate_token(token, SCOPE_ACCESS)?;

    let user = resources
        .database
        .users()
        .get_by_username(&username)
        .await?
        .ok_or_else(|| AppError::auth_invalid("Invalid authentication credentials"))?;

    if !user.is_active {
        return Err(AppError::auth_invalid("Account is deactivated"));
    }

    Ok(user)
}

/// Assemble the full application router
#[must_use]
pub fn router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(AuthRoutes::routes(resources.clone()))
        .merge(UserRoutes::routes(resources.clone()))
        .merge(EchoRoutes::routes(resources.clone()))
        .merge(TestRoutes::routes(resources.clone()))
        .merge(HealthRoutes::routes(resources.clone()))
        .layer(axum::middleware::from_fn_with_state(
            resources,
            middleware::track_requests,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
}
