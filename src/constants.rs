// ABOUTME: Constants re-exported from the dovana-core foundation crate
// ABOUTME: Limits, defaults, environment variable names and seed data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

//! Application constants, defined in `dovana-core`.

pub use dovana_core::constants::*;
