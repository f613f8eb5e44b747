// ABOUTME: Vendor and item management with validation and admin audit logging
// ABOUTME: Public reads and search, admin-only create, update and delete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::middleware::AdminContext;
use crate::models::{
    CreateItemRequest, CreateVendorRequest, Item, ItemWithVendor, UpdateItemRequest,
    UpdateVendorRequest, Vendor,
};

/// Fetch a vendor or fail with `404`
///
/// # Errors
///
/// Returns not-found for an unknown vendor
pub async fn get_vendor(database: &Database, id: i64) -> AppResult<Vendor> {
    database
        .vendors()
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Vendor {id}")))
}

/// Create a vendor
///
/// # Errors
///
/// Returns a validation error for missing or oversized fields
pub async fn create_vendor(
    database: &Database,
    admin: &AdminContext,
    request: &CreateVendorRequest,
) -> AppResult<Vendor> {
    let new = request.validate()?;
    let vendor = database.vendors().create(&new).await?;
    AppLogger::log_admin_action(&admin.actor(), "create", "vendor", vendor.id);
    Ok(vendor)
}

/// Update the given vendor fields
///
/// # Errors
///
/// Returns not-found for an unknown vendor and a validation error for bad fields
pub async fn update_vendor(
    database: &Database,
    admin: &AdminContext,
    id: i64,
    request: &UpdateVendorRequest,
) -> AppResult<Vendor> {
    let current = get_vendor(database, id).await?;
    let merged = request.apply_to(&current)?;
    let vendor = database.vendors().update(id, &merged).await?;
    AppLogger::log_admin_action(&admin.actor(), "update", "vendor", id);
    Ok(vendor)
}

/// Delete a vendor together with its items
///
/// # Errors
///
/// Returns not-found for an unknown vendor
pub async fn delete_vendor(database: &Database, admin: &AdminContext, id: i64) -> AppResult<()> {
    database.vendors().delete(id).await?;
    AppLogger::log_admin_action(&admin.actor(), "delete", "vendor", id);
    Ok(())
}

/// Fetch an item with its vendor name or fail with `404`
///
/// # Errors
///
/// Returns not-found for an unknown item
pub async fn get_item(database: &Database, id: i64) -> AppResult<ItemWithVendor> {
    database
        .items()
        .get_with_vendor(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Item {id}")))
}

/// Items whose name contains `query`; a blank query returns everything
///
/// # Errors
///
/// Returns an error if the database query fails
pub async fn search_items(database: &Database, query: Option<&str>) -> AppResult<Vec<ItemWithVendor>> {
    match query.map(str::trim).filter(|q| !q.is_empty()) {
        Some(query) => database.items().search(query).await,
        None => database.items().list().await,
    }
}

async fn ensure_vendor_exists(database: &Database, vendor_id: i64) -> AppResult<()> {
    if database.vendors().get(vendor_id).await?.is_none() {
        return Err(AppError::validation(
            "The selected vendor_id does not reference an existing vendor",
        ));
    }
    Ok(())
}

/// Create an item
///
/// # Errors
///
/// Returns a validation error for bad fields or an unknown vendor
pub async fn create_item(
    database: &Database,
    admin: &AdminContext,
    request: &CreateItemRequest,
) -> AppResult<Item> {
    let new = request.validate()?;
    ensure_vendor_exists(database, new.vendor_id).await?;
    let item = database.items().create(&new).await?;
    AppLogger::log_admin_action(&admin.actor(), "create", "item", item.id);
    Ok(item)
}

/// Update the given item fields
///
/// # Errors
///
/// Returns not-found for an unknown item and a validation error for bad
/// fields or an unknown vendor
pub async fn update_item(
    database: &Database,
    admin: &AdminContext,
    id: i64,
    request: &UpdateItemRequest,
) -> AppResult<Item> {
    let current = database
        .items()
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Item {id}")))?;
    let merged = request.apply_to(&current)?;
    if merged.vendor_id != current.vendor_id {
        ensure_vendor_exists(database, merged.vendor_id).await?;
    }
    let item = database.items().update(id, &merged).await?;
    AppLogger::log_admin_action(&admin.actor(), "update", "item", id);
    Ok(item)
}

/// Delete an item; featured rows are removed with position compaction
///
/// # Errors
///
/// Returns not-found for an unknown item
pub async fn delete_item(database: &Database, admin: &AdminContext, id: i64) -> AppResult<()> {
    database.items().delete(id).await?;
    AppLogger::log_admin_action(&admin.actor(), "delete", "item", id);
    Ok(())
}
