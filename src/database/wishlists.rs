// ABOUTME: Wishlist database operations
// ABOUTME: Toggle, check and list the items a user has saved
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::transactions::{retry_transaction, TransactionGuard};
use super::{map_write_error, parse_timestamp};
use crate::constants::limits::TRANSACTION_MAX_RETRIES;
use crate::errors::{AppError, AppResult};
use crate::models::{Item, ItemWithVendor};

/// Wishlist database operations manager
pub struct WishlistManager {
    pool: SqlitePool,
}

impl WishlistManager {
    /// Create a new wishlist manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Whether the item is on the user's wishlist
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn contains(&self, user_id: Uuid, item_id: i64) -> AppResult<bool> {
        let found: Option<i64> =
            sqlx::query_scalar("SELECT id FROM wishlists WHERE user_id = $1 AND item_id = $2")
                .bind(user_id.to_string())
                .bind(item_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to check wishlist: {e}")))?;
        Ok(found.is_some())
    }

    /// Add the item if absent, remove it if present; returns the new state
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn toggle(&self, user_id: Uuid, item_id: i64) -> AppResult<bool> {
        let pool = &self.pool;
        let user_id = user_id.to_string();
        let user_id = user_id.as_str();
        retry_transaction(
            || async move {
                let mut guard = TransactionGuard::new(pool.begin().await?);

                let removed =
                    sqlx::query("DELETE FROM wishlists WHERE user_id = $1 AND item_id = $2")
                        .bind(user_id)
                        .bind(item_id)
                        .execute(guard.executor()?)
                        .await
                        .map_err(|e| {
                            AppError::database(format!("Failed to update wishlist: {e}"))
                        })?;

                let saved = removed.rows_affected() == 0;
                if saved {
                    sqlx::query(
                        r"
                        INSERT INTO wishlists (user_id, item_id, created_at)
                        VALUES ($1, $2, $3)
                        ",
                    )
                    .bind(user_id)
                    .bind(item_id)
                    .bind(Utc::now().to_rfc3339())
                    .execute(guard.executor()?)
                    .await
                    .map_err(|e| map_write_error("Failed to update wishlist", &e))?;
                }

                guard.commit().await?;
                Ok(saved)
            },
            TRANSACTION_MAX_RETRIES,
        )
        .await
    }

    /// Items on the user's wishlist, most recently added first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn items_for_user(&self, user_id: Uuid) -> AppResult<Vec<ItemWithVendor>> {
        let rows = sqlx::query(
            r"
            SELECT i.id, i.name, i.description, i.price, i.image_url, i.vendor_id, i.product_url,
                   i.created_at, i.updated_at, v.name AS vendor_name
            FROM wishlists w
            JOIN items i ON i.id = w.item_id
            JOIN vendors v ON v.id = i.vendor_id
            WHERE w.user_id = $1
            ORDER BY w.created_at DESC, w.id DESC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list wishlist: {e}")))?;

        Ok(rows
            .iter()
            .map(|row| {
                let created_at: String = row.get("created_at");
                let updated_at: String = row.get("updated_at");
                ItemWithVendor {
                    item: Item {
                        id: row.get("id"),
                        name: row.get("name"),
                        description: row.get("description"),
                        price: row.get("price"),
                        image_url: row.get("image_url"),
                        vendor_id: row.get("vendor_id"),
                        product_url: row.get("product_url"),
                        created_at: parse_timestamp(&created_at),
                        updated_at: parse_timestamp(&updated_at),
                    },
                    vendor_name: row.get("vendor_name"),
                }
            })
            .collect())
    }
}
