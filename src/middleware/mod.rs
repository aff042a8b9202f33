// ABOUTME: HTTP middleware for the Echo server
// ABOUTME: Per-request telemetry recording
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Echo Platform

//! HTTP middleware

mod telemetry;

pub use telemetry::track_requests;
