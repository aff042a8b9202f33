// ABOUTME: Recipe management tools for meal planning and nutrition.
// ABOUTME: Implements validate_recipe, save_recipe, list_recipes, search_recipes.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recipe Management Tools
//!
//! This module will contain tools for recipe management:
//! - `get_recipe_constraints` - Get recipe validation constraints
//! - `validate_recipe` - Validate recipe data
//! - `save_recipe` - Save a new recipe
//! - `list_recipes` - List user's recipes
//! - `get_recipe` - Get recipe details
//! - `delete_recipe` - Delete a recipe
//! - `search_recipes` - Search recipes
//!
//! Implementation will be added in Phase 5.
