// ABOUTME: Domain service layer for catalog business rules extracted from route handlers
// ABOUTME: Mutations take an AdminContext so only verified admins can reach them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

//! Domain service layer
//!
//! Route handlers parse and authenticate; services validate, apply business
//! rules and write audit events. The CLI calls the same services, so rules
//! hold regardless of the entry point.

/// Attribute groups, attributes, item assignments and the occasion seed
pub mod attributes;

/// Vendor and item management
pub mod catalog;

/// The featured carousel: create, delete, reorder, reset
pub mod featured;

/// Click-through logging with duplicate suppression
pub mod redirects;

/// Per-user wishlists
pub mod wishlist;

/// Bulk product import from vendor XML feeds
pub mod xml_import;
