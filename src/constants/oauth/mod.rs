// ABOUTME: OAuth-related constants and configuration values
// ABOUTME: Includes provider identifiers and OAuth configuration defaults
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! OAuth constants module

pub mod providers;

// Re-export for easier access
pub use providers::*;
