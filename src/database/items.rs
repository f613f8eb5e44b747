// ABOUTME: Catalog item database operations
// ABOUTME: Listing with vendor names, name search, CRUD and bulk insert for feed imports
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};

use super::featured::remove_rows_for_items;
use super::transactions::{retry_transaction, TransactionGuard};
use super::{map_write_error, parse_timestamp};
use crate::constants::limits::TRANSACTION_MAX_RETRIES;
use crate::errors::{AppError, AppResult};
use crate::models::{Item, ItemWithVendor, NewItem};

const SELECT_WITH_VENDOR: &str = r"
    SELECT i.id, i.name, i.description, i.price, i.image_url, i.vendor_id, i.product_url,
           i.created_at, i.updated_at, v.name AS vendor_name
    FROM items i
    JOIN vendors v ON v.id = i.vendor_id
";

/// Escape `LIKE` wildcards so user input matches literally
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Search key stored next to each name
fn fold_name(name: &str) -> String {
    name.to_lowercase()
}

/// Item database operations manager
pub struct ItemManager {
    pool: SqlitePool,
}

impl ItemManager {
    /// Create a new item manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List every item with its vendor name
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list(&self) -> AppResult<Vec<ItemWithVendor>> {
        let rows = sqlx::query(&format!("{SELECT_WITH_VENDOR} ORDER BY i.id"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list items: {e}")))?;

        Ok(rows.iter().map(Self::row_to_item_with_vendor).collect())
    }

    /// Items whose name contains `query`, ignoring case
    ///
    /// Matching runs against `name_folded`, the Unicode-lowercased name, so
    /// `DĖŽUTĖ` finds `dėžutė` where SQLite's `LIKE` only folds ASCII.
    ///
    /// A blank query returns every item.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn search(&self, query: &str) -> AppResult<Vec<ItemWithVendor>> {
        let query = query.trim();
        if query.is_empty() {
            return self.list().await;
        }

        let pattern = format!("%{}%", escape_like(&fold_name(query)));
        let rows = sqlx::query(&format!(
            r"{SELECT_WITH_VENDOR} WHERE i.name_folded LIKE $1 ESCAPE '\' ORDER BY i.id"
        ))
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to search items: {e}")))?;

        Ok(rows.iter().map(Self::row_to_item_with_vendor).collect())
    }

    /// Get an item by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get(&self, id: i64) -> AppResult<Option<Item>> {
        Ok(self.get_with_vendor(id).await?.map(|row| row.item))
    }

    /// Get an item with its vendor name
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_with_vendor(&self, id: i64) -> AppResult<Option<ItemWithVendor>> {
        let row = sqlx::query(&format!("{SELECT_WITH_VENDOR} WHERE i.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get item: {e}")))?;

        Ok(row.as_ref().map(Self::row_to_item_with_vendor))
    }

    /// Whether an item exists
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn exists(&self, id: i64) -> AppResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to check item: {e}")))?;
        Ok(found.is_some())
    }

    async fn insert(conn: &mut SqliteConnection, item: &NewItem, now: DateTime<Utc>) -> AppResult<Item> {
        let result = sqlx::query(
            r"
            INSERT INTO items (name, name_folded, description, price, image_url, vendor_id, product_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            ",
        )
        .bind(&item.name)
        .bind(fold_name(&item.name))
        .bind(&item.description)
        .bind(item.price)
        .bind(&item.image_url)
        .bind(item.vendor_id)
        .bind(&item.product_url)
        .bind(now.to_rfc3339())
        .execute(conn)
        .await
        .map_err(|e| map_write_error("Failed to create item", &e))?;

        Ok(Item {
            id: result.last_insert_rowid(),
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price,
            image_url: item.image_url.clone(),
            vendor_id: item.vendor_id,
            product_url: item.product_url.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Create an item
    ///
    /// # Errors
    ///
    /// Returns a validation error when the vendor does not exist
    pub async fn create(&self, item: &NewItem) -> AppResult<Item> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| AppError::database(format!("Failed to acquire connection: {e}")))?;
        Self::insert(&mut conn, item, Utc::now()).await
    }

    /// Insert several items atomically; either all are stored or none
    ///
    /// # Errors
    ///
    /// Returns the first insert error, after rolling back
    pub async fn create_many(&self, items: &[NewItem]) -> AppResult<Vec<Item>> {
        let pool = &self.pool;
        retry_transaction(
            || async move {
                let mut guard = TransactionGuard::new(pool.begin().await?);
                let now = Utc::now();
                let mut created = Vec::with_capacity(items.len());
                for item in items {
                    created.push(Self::insert(guard.executor()?, item, now).await?);
                }
                guard.commit().await?;
                Ok(created)
            },
            TRANSACTION_MAX_RETRIES,
        )
        .await
    }

    /// Overwrite an item's fields
    ///
    /// # Errors
    ///
    /// Returns not-found when the item does not exist
    pub async fn update(&self, id: i64, item: &NewItem) -> AppResult<Item> {
        let result = sqlx::query(
            r"
            UPDATE items
            SET name = $1, name_folded = $2, description = $3, price = $4, image_url = $5,
                vendor_id = $6, product_url = $7, updated_at = $8
            WHERE id = $9
            ",
        )
        .bind(&item.name)
        .bind(fold_name(&item.name))
        .bind(&item.description)
        .bind(item.price)
        .bind(&item.image_url)
        .bind(item.vendor_id)
        .bind(&item.product_url)
        .bind(Utc::now().to_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error("Failed to update item", &e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Item {id}")));
        }
        self.get(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Item {id}")))
    }

    /// Delete an item, compacting the featured carousel if it was featured
    ///
    /// Wishlist entries, attribute assignments and redirect logs cascade.
    ///
    /// # Errors
    ///
    /// Returns not-found when the item does not exist
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let pool = &self.pool;
        retry_transaction(
            || async move {
                let mut guard = TransactionGuard::new(pool.begin().await?);

                remove_rows_for_items(guard.executor()?, &[id]).await?;

                let result = sqlx::query("DELETE FROM items WHERE id = $1")
                    .bind(id)
                    .execute(guard.executor()?)
                    .await
                    .map_err(|e| AppError::database(format!("Failed to delete item: {e}")))?;
                if result.rows_affected() == 0 {
                    return Err(AppError::not_found(format!("Item {id}")));
                }

                guard.commit().await
            },
            TRANSACTION_MAX_RETRIES,
        )
        .await
    }

    fn row_to_item(row: &SqliteRow) -> Item {
        let created_at: String = row.get("created_at");
        let updated_at: String = row.get("updated_at");
        Item {
            id: row.get("id"),
            name: row.get("name"),
            description: row.get("description"),
            price: row.get("price"),
            image_url: row.get("image_url"),
            vendor_id: row.get("vendor_id"),
            product_url: row.get("product_url"),
            created_at: parse_timestamp(&created_at),
            updated_at: parse_timestamp(&updated_at),
        }
    }

    fn row_to_item_with_vendor(row: &SqliteRow) -> ItemWithVendor {
        ItemWithVendor {
            item: Self::row_to_item(row),
            vendor_name: row.get("vendor_name"),
        }
    }
}
