// ABOUTME: Re-exports pagination types from pierre-core for unified type identity
// ABOUTME: Ensures PaginationParams/CursorPage are the same type across all workspace crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use pierre_core::pagination::*;
