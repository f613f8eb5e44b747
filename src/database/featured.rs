// ABOUTME: Featured carousel database operations built on the FeaturedLineup collection
// ABOUTME: Create, compacting delete, adjacent swap and position reset, each in one transaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

use chrono::{NaiveDate, Utc};
use dovana_core::lineup::{FeaturedLineup, LineupEntry, PositionChange};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};
use tracing::debug;

use super::transactions::{retry_transaction, TransactionGuard};
use crate::constants::limits::TRANSACTION_MAX_RETRIES;
use crate::errors::{AppError, AppResult};
use crate::models::{FeaturedItem, FeaturedItemView, MoveDirection, NewFeaturedItem};

const DATE_FORMAT: &str = "%Y-%m-%d";

fn parse_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| AppError::database(format!("Invalid stored date '{value}': {e}")))
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn row_to_featured(row: &SqliteRow) -> AppResult<FeaturedItem> {
    let start_date: String = row.get("start_date");
    let end_date: String = row.get("end_date");
    Ok(FeaturedItem {
        id: row.get("id"),
        item_id: row.get("item_id"),
        start_date: parse_date(&start_date)?,
        end_date: parse_date(&end_date)?,
        position: row.get("position"),
    })
}

/// Load every featured row in position order
async fn load_rows(conn: &mut SqliteConnection) -> AppResult<Vec<FeaturedItem>> {
    let rows = sqlx::query(
        r"
        SELECT id, item_id, start_date, end_date, position
        FROM featured_items
        ORDER BY position, id
        ",
    )
    .fetch_all(conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to load featured items: {e}")))?;

    rows.iter().map(row_to_featured).collect()
}

fn lineup_of(rows: &[FeaturedItem]) -> FeaturedLineup {
    FeaturedLineup::from_entries(
        rows.iter()
            .map(|row| LineupEntry::new(row.id, row.position)),
    )
}

/// Persist position changes computed by the lineup
///
/// Rows are first parked on distinct negative positions, then moved to their
/// targets, so the unique position index never sees a transient duplicate
/// whatever the permutation.
async fn apply_position_changes(
    conn: &mut SqliteConnection,
    changes: &[PositionChange],
) -> AppResult<()> {
    if changes.is_empty() {
        return Ok(());
    }
    let now = Utc::now().to_rfc3339();

    for change in changes {
        sqlx::query("UPDATE featured_items SET position = $1 WHERE id = $2")
            .bind(-(change.to + 1))
            .bind(change.id)
            .execute(&mut *conn)
            .await
            .map_err(|e| AppError::database(format!("Failed to park featured position: {e}")))?;
    }
    for change in changes {
        sqlx::query("UPDATE featured_items SET position = $1, updated_at = $2 WHERE id = $3")
            .bind(change.to)
            .bind(&now)
            .bind(change.id)
            .execute(&mut *conn)
            .await
            .map_err(|e| AppError::database(format!("Failed to update featured position: {e}")))?;
    }
    debug!(changed = changes.len(), "Applied featured position changes");
    Ok(())
}

/// Delete the featured rows of the given items and compact the rest
///
/// Runs on the caller's transaction; used before deleting items or vendors.
pub(super) async fn remove_rows_for_items(
    conn: &mut SqliteConnection,
    item_ids: &[i64],
) -> AppResult<usize> {
    if item_ids.is_empty() {
        return Ok(0);
    }
    let rows = load_rows(&mut *conn).await?;
    let mut lineup = lineup_of(&rows);
    let mut changes: Vec<PositionChange> = Vec::new();
    let mut removed = 0;

    for row in rows.iter().filter(|row| item_ids.contains(&row.item_id)) {
        sqlx::query("DELETE FROM featured_items WHERE id = $1")
            .bind(row.id)
            .execute(&mut *conn)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete featured item: {e}")))?;
        changes.retain(|change| change.id != row.id);
        merge_changes(&mut changes, lineup.remove(row.id)?);
        removed += 1;
    }

    apply_position_changes(conn, &changes).await?;
    Ok(removed)
}

/// Fold a later batch of changes into an earlier one so each row appears once
fn merge_changes(accumulated: &mut Vec<PositionChange>, later: Vec<PositionChange>) {
    for change in later {
        if let Some(existing) = accumulated.iter_mut().find(|c| c.id == change.id) {
            existing.to = change.to;
        } else {
            accumulated.push(change);
        }
    }
    accumulated.retain(|c| c.from != c.to);
}

/// Featured carousel database operations manager
pub struct FeaturedItemManager {
    pool: SqlitePool,
}

impl FeaturedItemManager {
    /// Create a new featured item manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Featured rows joined with item and vendor, in display order
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list(&self) -> AppResult<Vec<FeaturedItemView>> {
        let rows = sqlx::query(
            r"
            SELECT f.id, f.item_id, f.start_date, f.end_date, f.position,
                   i.name, i.description, i.price, i.image_url, i.product_url,
                   v.name AS vendor_name
            FROM featured_items f
            JOIN items i ON i.id = f.item_id
            JOIN vendors v ON v.id = i.vendor_id
            ORDER BY f.position
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list featured items: {e}")))?;

        rows.iter()
            .map(|row| {
                let start_date: String = row.get("start_date");
                let end_date: String = row.get("end_date");
                Ok(FeaturedItemView {
                    id: row.get("id"),
                    item_id: row.get("item_id"),
                    name: row.get("name"),
                    vendor_name: row.get("vendor_name"),
                    description: row.get("description"),
                    price: row.get("price"),
                    image_url: row.get("image_url"),
                    product_url: row.get("product_url"),
                    start_date: parse_date(&start_date)?,
                    end_date: parse_date(&end_date)?,
                    position: row.get("position"),
                })
            })
            .collect()
    }

    /// Raw featured rows in position order
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn rows(&self) -> AppResult<Vec<FeaturedItem>> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| AppError::database(format!("Failed to acquire connection: {e}")))?;
        load_rows(&mut conn).await
    }

    /// Append a featured row at the end of the carousel
    ///
    /// The item check, the capacity check and the insert share one
    /// transaction, so two concurrent creates cannot both take the last slot.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an unknown item and a capacity error
    /// when the carousel is full
    pub async fn create(&self, new: &NewFeaturedItem) -> AppResult<FeaturedItem> {
        let pool = &self.pool;
        retry_transaction(
            || async move {
                let mut guard = TransactionGuard::new(pool.begin().await?);

                let item_exists: Option<i64> =
                    sqlx::query_scalar("SELECT id FROM items WHERE id = $1")
                        .bind(new.item_id)
                        .fetch_optional(guard.executor()?)
                        .await
                        .map_err(|e| AppError::database(format!("Failed to check item: {e}")))?;
                if item_exists.is_none() {
                    return Err(AppError::validation(
                        "The selected item_id does not reference an existing item",
                    ));
                }

                let rows = load_rows(guard.executor()?).await?;
                let position = lineup_of(&rows).next_position()?;

                let now = Utc::now().to_rfc3339();
                let result = sqlx::query(
                    r"
                    INSERT INTO featured_items (item_id, start_date, end_date, position, created_at, updated_at)
                    VALUES ($1, $2, $3, $4, $5, $5)
                    ",
                )
                .bind(new.item_id)
                .bind(format_date(new.start_date))
                .bind(format_date(new.end_date))
                .bind(position)
                .bind(&now)
                .execute(guard.executor()?)
                .await
                .map_err(|e| AppError::database(format!("Failed to create featured item: {e}")))?;

                guard.commit().await?;
                Ok(FeaturedItem {
                    id: result.last_insert_rowid(),
                    item_id: new.item_id,
                    start_date: new.start_date,
                    end_date: new.end_date,
                    position,
                })
            },
            TRANSACTION_MAX_RETRIES,
        )
        .await
    }

    /// Delete a featured row and shift every later row down by one
    ///
    /// # Errors
    ///
    /// Returns not-found when the row does not exist
    pub async fn delete(&self, id: i64) -> AppResult<Vec<PositionChange>> {
        let pool = &self.pool;
        retry_transaction(
            || async move {
                let mut guard = TransactionGuard::new(pool.begin().await?);

                let rows = load_rows(guard.executor()?).await?;
                let mut lineup = lineup_of(&rows);
                let changes = lineup.remove(id)?;

                sqlx::query("DELETE FROM featured_items WHERE id = $1")
                    .bind(id)
                    .execute(guard.executor()?)
                    .await
                    .map_err(|e| AppError::database(format!("Failed to delete featured item: {e}")))?;
                apply_position_changes(guard.executor()?, &changes).await?;

                guard.commit().await?;
                Ok(changes)
            },
            TRANSACTION_MAX_RETRIES,
        )
        .await
    }

    /// Swap a featured row with its neighbour
    ///
    /// # Errors
    ///
    /// Returns not-found for an unknown row and a boundary error when the row
    /// is already first (moving up) or last (moving down)
    pub async fn move_item(
        &self,
        id: i64,
        direction: MoveDirection,
    ) -> AppResult<[PositionChange; 2]> {
        let pool = &self.pool;
        retry_transaction(
            || async move {
                let mut guard = TransactionGuard::new(pool.begin().await?);

                let rows = load_rows(guard.executor()?).await?;
                let mut lineup = lineup_of(&rows);
                let changes = lineup.move_entry(id, direction)?;
                apply_position_changes(guard.executor()?, &changes).await?;

                guard.commit().await?;
                Ok(changes)
            },
            TRANSACTION_MAX_RETRIES,
        )
        .await
    }

    /// Renumber all rows `0..n` in ascending id order
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails
    pub async fn reset_positions(&self) -> AppResult<Vec<PositionChange>> {
        let pool = &self.pool;
        retry_transaction(
            || async move {
                let mut guard = TransactionGuard::new(pool.begin().await?);

                let rows = load_rows(guard.executor()?).await?;
                let changes = lineup_of(&rows).reset_by_id();
                apply_position_changes(guard.executor()?, &changes).await?;

                guard.commit().await?;
                Ok(changes)
            },
            TRANSACTION_MAX_RETRIES,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_changes_collapses_repeated_rows() {
        let mut accumulated = vec![
            PositionChange { id: 3, from: 2, to: 1 },
            PositionChange { id: 4, from: 3, to: 2 },
        ];
        merge_changes(
            &mut accumulated,
            vec![PositionChange { id: 4, from: 2, to: 1 }],
        );
        assert_eq!(
            accumulated,
            vec![
                PositionChange { id: 3, from: 2, to: 1 },
                PositionChange { id: 4, from: 3, to: 1 },
            ]
        );
    }
}
