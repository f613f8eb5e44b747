// ABOUTME: Vendor database operations
// ABOUTME: CRUD for vendors; deleting one removes its items and their featured slots
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::featured::remove_rows_for_items;
use super::transactions::{retry_transaction, TransactionGuard};
use super::{map_write_error, parse_timestamp};
use crate::constants::limits::TRANSACTION_MAX_RETRIES;
use crate::errors::{AppError, AppResult};
use crate::models::{NewVendor, Vendor};

/// Vendor database operations manager
pub struct VendorManager {
    pool: SqlitePool,
}

impl VendorManager {
    /// Create a new vendor manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all vendors
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list(&self) -> AppResult<Vec<Vendor>> {
        let rows = sqlx::query(
            r"
            SELECT id, name, contact_details, website, created_at, updated_at
            FROM vendors
            ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list vendors: {e}")))?;

        Ok(rows.iter().map(Self::row_to_vendor).collect())
    }

    /// Get a vendor by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get(&self, id: i64) -> AppResult<Option<Vendor>> {
        let row = sqlx::query(
            r"
            SELECT id, name, contact_details, website, created_at, updated_at
            FROM vendors
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get vendor: {e}")))?;

        Ok(row.as_ref().map(Self::row_to_vendor))
    }

    /// Create a vendor
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create(&self, vendor: &NewVendor) -> AppResult<Vendor> {
        let now = Utc::now();
        let result = sqlx::query(
            r"
            INSERT INTO vendors (name, contact_details, website, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            ",
        )
        .bind(&vendor.name)
        .bind(&vendor.contact_details)
        .bind(&vendor.website)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error("Failed to create vendor", &e))?;

        Ok(Vendor {
            id: result.last_insert_rowid(),
            name: vendor.name.clone(),
            contact_details: vendor.contact_details.clone(),
            website: vendor.website.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Overwrite a vendor's fields
    ///
    /// # Errors
    ///
    /// Returns not-found when the vendor does not exist
    pub async fn update(&self, id: i64, vendor: &NewVendor) -> AppResult<Vendor> {
        let result = sqlx::query(
            r"
            UPDATE vendors
            SET name = $1, contact_details = $2, website = $3, updated_at = $4
            WHERE id = $5
            ",
        )
        .bind(&vendor.name)
        .bind(&vendor.contact_details)
        .bind(&vendor.website)
        .bind(Utc::now().to_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error("Failed to update vendor", &e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Vendor {id}")));
        }
        self.get(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Vendor {id}")))
    }

    /// Delete a vendor, its items, and any featured slots of those items
    ///
    /// # Errors
    ///
    /// Returns not-found when the vendor does not exist
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let pool = &self.pool;
        retry_transaction(
            || async move {
                let mut guard = TransactionGuard::new(pool.begin().await?);

                let item_ids: Vec<i64> =
                    sqlx::query_scalar("SELECT id FROM items WHERE vendor_id = $1")
                        .bind(id)
                        .fetch_all(guard.executor()?)
                        .await
                        .map_err(|e| AppError::database(format!("Failed to load vendor items: {e}")))?;

                remove_rows_for_items(guard.executor()?, &item_ids).await?;

                let result = sqlx::query("DELETE FROM vendors WHERE id = $1")
                    .bind(id)
                    .execute(guard.executor()?)
                    .await
                    .map_err(|e| AppError::database(format!("Failed to delete vendor: {e}")))?;
                if result.rows_affected() == 0 {
                    return Err(AppError::not_found(format!("Vendor {id}")));
                }

                guard.commit().await
            },
            TRANSACTION_MAX_RETRIES,
        )
        .await
    }

    fn row_to_vendor(row: &SqliteRow) -> Vendor {
        let created_at: String = row.get("created_at");
        let updated_at: String = row.get("updated_at");
        Vendor {
            id: row.get("id"),
            name: row.get("name"),
            contact_details: row.get("contact_details"),
            website: row.get("website"),
            created_at: parse_timestamp(&created_at),
            updated_at: parse_timestamp(&updated_at),
        }
    }
}
