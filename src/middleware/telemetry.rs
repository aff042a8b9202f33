// ABOUTME: Request telemetry middleware recording one api_hits row per request
// ABOUTME: Captures method, path, status, and latency; never fails the request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Echo Platform

//! Per-request telemetry recording
//!
//! Runs outside the handlers, so no authenticated user is available here;
//! hits are recorded without attribution. Generation-call telemetry carries
//! the user id instead.

use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use crate::resources::ServerResources;

/// Record one `api_hits` row per request
pub async fn track_requests(
    State(resources): State<Arc<ServerResources>>,
    request: axum::extract::Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    debug!("{method} {path} -> {status} ({elapsed_ms:.1} ms)");

    resources
        .database
        .telemetry()
        .record_api_hit(None, &method, &path, status, elapsed_ms)
        .await;

    response
}
