// ABOUTME: Core types and constants for the Dovana gift catalog service
// ABOUTME: Foundation crate with error handling, domain models, constants and featured ordering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

#![deny(unsafe_code)]

//! # Dovana Core
//!
//! Foundation crate providing shared types for the Dovana gift catalog.
//! It changes rarely, so the server crate gets incremental compilation
//! benefits from keeping these definitions here.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Limits, defaults and environment variable names
//! - **models**: Vendors, items, featured items, attributes, wishlists, users
//! - **lineup**: The ordered featured-items collection and its position rules

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Catalog domain models
pub mod models;

/// Ordered, dense-position collection backing the featured carousel
pub mod lineup;
