// ABOUTME: Per-user wishlist operations for authenticated shoppers
// ABOUTME: Toggle membership, check membership and list wished items
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

use tracing::debug;

use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::middleware::AuthContext;
use crate::models::{ItemWithVendor, WishlistStatus};

/// Items on the caller's wishlist
///
/// # Errors
///
/// Returns an error if the database query fails
pub async fn list_wishlist(database: &Database, auth: &AuthContext) -> AppResult<Vec<ItemWithVendor>> {
    database.wishlists().items_for_user(auth.user_id()).await
}

/// Add the item when absent, remove it when present
///
/// # Errors
///
/// Returns not-found for an unknown item
pub async fn toggle_wishlist(
    database: &Database,
    auth: &AuthContext,
    item_id: i64,
) -> AppResult<WishlistStatus> {
    if !database.items().exists(item_id).await? {
        return Err(AppError::not_found(format!("Item {item_id}")));
    }
    let in_wishlist = database.wishlists().toggle(auth.user_id(), item_id).await?;
    debug!(user.id = %auth.user_id(), item_id, in_wishlist, "Wishlist toggled");
    Ok(WishlistStatus { in_wishlist })
}

/// Whether the item is on the caller's wishlist
///
/// # Errors
///
/// Returns an error if the database query fails
pub async fn check_wishlist(
    database: &Database,
    auth: &AuthContext,
    item_id: i64,
) -> AppResult<WishlistStatus> {
    let in_wishlist = database.wishlists().contains(auth.user_id(), item_id).await?;
    Ok(WishlistStatus { in_wishlist })
}
