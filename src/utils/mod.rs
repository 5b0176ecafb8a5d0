// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 dagcheck contributors

//! Utility modules
//!
//! Common utilities for the dagcheck CLI.

pub mod colors;

pub use colors::*;
