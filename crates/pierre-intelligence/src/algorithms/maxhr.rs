// ABOUTME: Maximum heart rate estimation algorithms re-exported from pierre-core
// ABOUTME: Implements Fox, Tanaka, Nes, and Gulati formulas with scientific validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use pierre_core::intelligence::algorithms::maxhr::*;
