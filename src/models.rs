// ABOUTME: Domain models re-exported from the dovana-core foundation crate
// ABOUTME: Vendors, items, featured rows, attributes, wishlists, redirects and users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

//! Catalog domain models, defined in `dovana-core`.

pub use dovana_core::models::*;
pub use dovana_core::lineup::PositionChange;
