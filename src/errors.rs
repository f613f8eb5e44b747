// ABOUTME: Error handling re-exports from the dovana-core foundation crate
// ABOUTME: Lets server modules write `crate::errors::AppError` like the rest of the code
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

//! Unified error handling, defined in `dovana-core`.

pub use dovana_core::errors::{
    AppError, AppResult, ErrorCode, ErrorResponse, ErrorResponseDetails,
};
