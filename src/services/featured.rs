// ABOUTME: Featured carousel business logic on top of the lineup-backed database manager
// ABOUTME: Validates admin input, applies create, delete and swap, and writes audit events
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

use dovana_core::lineup::PositionChange;
use tracing::info;

use crate::database::Database;
use crate::errors::AppResult;
use crate::logging::AppLogger;
use crate::middleware::AdminContext;
use crate::models::{
    CreateFeaturedItemRequest, FeaturedItem, FeaturedItemView, ReorderFeaturedItemRequest,
};

/// Featured items in display order
///
/// # Errors
///
/// Returns an error if the database query fails
pub async fn list_featured(database: &Database) -> AppResult<Vec<FeaturedItemView>> {
    database.featured().list().await
}

/// Append an item to the end of the carousel
///
/// # Errors
///
/// Returns a validation error for bad input or an unknown item, and a
/// capacity error when the carousel already holds the maximum
pub async fn create_featured(
    database: &Database,
    admin: &AdminContext,
    request: &CreateFeaturedItemRequest,
) -> AppResult<FeaturedItem> {
    let new = request.validate()?;
    let created = database.featured().create(&new).await?;

    AppLogger::log_featured_change(&admin.actor(), "create", created.id, 1);
    Ok(created)
}

/// Remove a row and close the gap it leaves
///
/// # Errors
///
/// Returns not-found for an unknown row
pub async fn delete_featured(
    database: &Database,
    admin: &AdminContext,
    id: i64,
) -> AppResult<Vec<PositionChange>> {
    let changes = database.featured().delete(id).await?;

    AppLogger::log_featured_change(&admin.actor(), "delete", id, changes.len());
    Ok(changes)
}

/// Swap a row with its neighbour in the requested direction
///
/// # Errors
///
/// Returns a validation error for bad input, not-found for an unknown row
/// and a boundary error at either end of the carousel
pub async fn reorder_featured(
    database: &Database,
    admin: &AdminContext,
    request: &ReorderFeaturedItemRequest,
) -> AppResult<[PositionChange; 2]> {
    let (id, direction) = request.validate()?;
    let changes = database.featured().move_item(id, direction).await?;

    AppLogger::log_featured_change(&admin.actor(), direction.as_str(), id, changes.len());
    Ok(changes)
}

/// Renumber every row `0..n` by ascending id
///
/// Maintenance operation run by operators from the CLI.
///
/// # Errors
///
/// Returns an error if the transaction fails
pub async fn reset_positions(database: &Database) -> AppResult<Vec<PositionChange>> {
    let changes = database.featured().reset_positions().await?;
    info!(changed_rows = changes.len(), "Featured positions reset");
    Ok(changes)
}
