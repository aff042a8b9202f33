// ABOUTME: Notification system module for real-time OAuth and system notifications
// ABOUTME: Provides SSE endpoints and notification broadcasting for client updates
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

/// Server-Sent Events implementation for real-time notifications
pub mod sse;
