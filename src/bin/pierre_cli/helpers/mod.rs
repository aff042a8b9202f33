// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports helper modules for pierre-cli
// ABOUTME: Provides access to JWKS and display formatting utilities

pub mod display;
pub mod jwks;
