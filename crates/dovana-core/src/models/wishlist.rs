// ABOUTME: Wishlist entry model and toggle/check status payload
// ABOUTME: A wishlist entry pairs a user with an item, at most once
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An item saved by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistEntry {
    /// Primary key
    pub id: i64,
    /// Owner
    pub user_id: Uuid,
    /// Saved item
    pub item_id: i64,
    /// When the item was saved
    pub created_at: DateTime<Utc>,
}

/// Response of the toggle and check endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistStatus {
    /// Whether the item is on the caller's wishlist after the call
    #[serde(rename = "inWishlist")]
    pub in_wishlist: bool,
}
