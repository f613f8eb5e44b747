// ABOUTME: Attribute groups, attributes and item assignments for catalog filtering
// ABOUTME: Includes the idempotent seed of the occasion group used by the storefront
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

use tracing::info;

use crate::constants::seeds::{OCCASIONS, OCCASION_GROUP};
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::middleware::AdminContext;
use crate::models::{
    Attribute, AttributeGroup, AttributeGroupRequest, AttributeRequest, ItemAttribute,
    ItemAttributeRequest,
};

async fn ensure_group_exists(database: &Database, group_id: i64) -> AppResult<()> {
    if database.attributes().get_group(group_id).await?.is_none() {
        return Err(AppError::validation(
            "The selected attribute_group_id does not reference an existing group",
        ));
    }
    Ok(())
}

/// Create an attribute group
///
/// # Errors
///
/// Returns a validation error for a bad name and `409` for a duplicate
pub async fn create_group(
    database: &Database,
    admin: &AdminContext,
    request: &AttributeGroupRequest,
) -> AppResult<AttributeGroup> {
    let name = request.validate()?;
    let group = database.attributes().create_group(&name).await?;
    AppLogger::log_admin_action(&admin.actor(), "create", "attribute_group", group.id);
    Ok(group)
}

/// Rename an attribute group
///
/// # Errors
///
/// Returns not-found for an unknown group and `409` for a duplicate name
pub async fn update_group(
    database: &Database,
    admin: &AdminContext,
    id: i64,
    request: &AttributeGroupRequest,
) -> AppResult<AttributeGroup> {
    let name = request.validate()?;
    let group = database.attributes().update_group(id, &name).await?;
    AppLogger::log_admin_action(&admin.actor(), "update", "attribute_group", id);
    Ok(group)
}

/// Delete an empty attribute group
///
/// # Errors
///
/// Returns a validation error while the group has attributes
pub async fn delete_group(database: &Database, admin: &AdminContext, id: i64) -> AppResult<()> {
    database.attributes().delete_group(id).await?;
    AppLogger::log_admin_action(&admin.actor(), "delete", "attribute_group", id);
    Ok(())
}

/// Create an attribute inside an existing group
///
/// # Errors
///
/// Returns a validation error for bad input or an unknown group
pub async fn create_attribute(
    database: &Database,
    admin: &AdminContext,
    request: &AttributeRequest,
) -> AppResult<Attribute> {
    let (name, group_id) = request.validate()?;
    ensure_group_exists(database, group_id).await?;
    let attribute = database.attributes().create_attribute(&name, group_id).await?;
    AppLogger::log_admin_action(&admin.actor(), "create", "attribute", attribute.id);
    Ok(attribute)
}

/// Rename or move an attribute
///
/// # Errors
///
/// Returns not-found for an unknown attribute and a validation error for
/// bad input or an unknown group
pub async fn update_attribute(
    database: &Database,
    admin: &AdminContext,
    id: i64,
    request: &AttributeRequest,
) -> AppResult<Attribute> {
    let (name, group_id) = request.validate()?;
    ensure_group_exists(database, group_id).await?;
    let attribute = database
        .attributes()
        .update_attribute(id, &name, group_id)
        .await?;
    AppLogger::log_admin_action(&admin.actor(), "update", "attribute", id);
    Ok(attribute)
}

/// Delete an attribute and its item assignments
///
/// # Errors
///
/// Returns not-found for an unknown attribute
pub async fn delete_attribute(database: &Database, admin: &AdminContext, id: i64) -> AppResult<()> {
    database.attributes().delete_attribute(id).await?;
    AppLogger::log_admin_action(&admin.actor(), "delete", "attribute", id);
    Ok(())
}

/// Tag an item with an attribute
///
/// # Errors
///
/// Returns a validation error when either side does not exist and `409`
/// when the pair is already assigned
pub async fn assign_attribute(
    database: &Database,
    admin: &AdminContext,
    request: &ItemAttributeRequest,
) -> AppResult<ItemAttribute> {
    let (item_id, attribute_id) = request.validate()?;
    if !database.items().exists(item_id).await? {
        return Err(AppError::validation(
            "The selected item_id does not reference an existing item",
        ));
    }
    if !database.attributes().attribute_exists(attribute_id).await? {
        return Err(AppError::validation(
            "The selected attribute_id does not reference an existing attribute",
        ));
    }
    let assignment = database.attributes().assign(item_id, attribute_id).await?;
    AppLogger::log_admin_action(&admin.actor(), "assign", "item_attribute", assignment.id);
    Ok(assignment)
}

/// Remove an attribute from an item
///
/// # Errors
///
/// Returns not-found for an unknown assignment
pub async fn unassign_attribute(database: &Database, admin: &AdminContext, id: i64) -> AppResult<()> {
    database.attributes().unassign(id).await?;
    AppLogger::log_admin_action(&admin.actor(), "unassign", "item_attribute", id);
    Ok(())
}

/// Result of seeding the occasion attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    /// The occasion group
    pub group: AttributeGroup,
    /// Attributes created by this run
    pub created: usize,
}

/// Ensure the occasion group and its attributes exist
///
/// Safe to run repeatedly; existing rows are left alone.
///
/// # Errors
///
/// Returns an error if a database operation fails
pub async fn seed_occasions(database: &Database) -> AppResult<SeedReport> {
    let attributes = database.attributes();
    let group = match attributes.get_group_by_name(OCCASION_GROUP).await? {
        Some(group) => group,
        None => attributes.create_group(OCCASION_GROUP).await?,
    };

    let mut created = 0;
    for occasion in OCCASIONS {
        if attributes.find_attribute(group.id, occasion).await?.is_none() {
            attributes.create_attribute(occasion, group.id).await?;
            created += 1;
        }
    }

    info!(group = %group.name, created, "Occasion attributes seeded");
    Ok(SeedReport { group, created })
}
