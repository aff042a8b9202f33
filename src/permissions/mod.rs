// ABOUTME: Role-based permission system re-exported from pierre-core
// ABOUTME: Provides extensible permission checking via trait and bitflags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use pierre_core::permissions::*;
