// ABOUTME: Attribute group, attribute and item-attribute database operations
// ABOUTME: Group names are unique; a group with attributes cannot be deleted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::map_write_error;
use crate::errors::{AppError, AppResult};
use crate::models::{Attribute, AttributeGroup, ItemAttribute, ItemAttributeDetail};

/// Attribute database operations manager
pub struct AttributeManager {
    pool: SqlitePool,
}

impl AttributeManager {
    /// Create a new attribute manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ========================================================================
    // Attribute Groups
    // ========================================================================

    /// List all groups
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_groups(&self) -> AppResult<Vec<AttributeGroup>> {
        let rows = sqlx::query("SELECT id, name FROM attribute_groups ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list attribute groups: {e}")))?;

        Ok(rows.iter().map(Self::row_to_group).collect())
    }

    /// Get a group by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_group(&self, id: i64) -> AppResult<Option<AttributeGroup>> {
        let row = sqlx::query("SELECT id, name FROM attribute_groups WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get attribute group: {e}")))?;

        Ok(row.as_ref().map(Self::row_to_group))
    }

    /// Get a group by its unique name
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_group_by_name(&self, name: &str) -> AppResult<Option<AttributeGroup>> {
        let row = sqlx::query("SELECT id, name FROM attribute_groups WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get attribute group: {e}")))?;

        Ok(row.as_ref().map(Self::row_to_group))
    }

    /// Create a group
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` when the name is taken
    pub async fn create_group(&self, name: &str) -> AppResult<AttributeGroup> {
        let result = sqlx::query("INSERT INTO attribute_groups (name) VALUES ($1)")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error("Failed to create attribute group", &e))?;

        Ok(AttributeGroup {
            id: result.last_insert_rowid(),
            name: name.to_owned(),
        })
    }

    /// Rename a group
    ///
    /// # Errors
    ///
    /// Returns not-found for an unknown group and `ResourceAlreadyExists`
    /// when the new name is taken
    pub async fn update_group(&self, id: i64, name: &str) -> AppResult<AttributeGroup> {
        let result = sqlx::query("UPDATE attribute_groups SET name = $1 WHERE id = $2")
            .bind(name)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error("Failed to update attribute group", &e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Attribute group {id}")));
        }
        Ok(AttributeGroup {
            id,
            name: name.to_owned(),
        })
    }

    /// Delete an empty group
    ///
    /// # Errors
    ///
    /// Returns a validation error while the group still has attributes and
    /// not-found for an unknown group
    pub async fn delete_group(&self, id: i64) -> AppResult<()> {
        let attribute_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM attributes WHERE attribute_group_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to count attributes: {e}")))?;
        if attribute_count > 0 {
            return Err(AppError::validation(
                "Cannot delete group that has attributes. Please delete all attributes first.",
            )
            .with_details(serde_json::json!({ "attribute_count": attribute_count })));
        }

        let result = sqlx::query("DELETE FROM attribute_groups WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error("Failed to delete attribute group", &e))?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Attribute group {id}")));
        }
        Ok(())
    }

    // ========================================================================
    // Attributes
    // ========================================================================

    /// List all attributes
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_attributes(&self) -> AppResult<Vec<Attribute>> {
        let rows = sqlx::query("SELECT id, name, attribute_group_id FROM attributes ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list attributes: {e}")))?;

        Ok(rows.iter().map(Self::row_to_attribute).collect())
    }

    /// List the attributes of one group
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_attributes_in_group(&self, group_id: i64) -> AppResult<Vec<Attribute>> {
        let rows = sqlx::query(
            "SELECT id, name, attribute_group_id FROM attributes WHERE attribute_group_id = $1 ORDER BY id",
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list attributes: {e}")))?;

        Ok(rows.iter().map(Self::row_to_attribute).collect())
    }

    /// Find an attribute by name inside a group
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn find_attribute(&self, group_id: i64, name: &str) -> AppResult<Option<Attribute>> {
        let row = sqlx::query(
            "SELECT id, name, attribute_group_id FROM attributes WHERE attribute_group_id = $1 AND name = $2",
        )
        .bind(group_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get attribute: {e}")))?;

        Ok(row.as_ref().map(Self::row_to_attribute))
    }

    /// Whether an attribute exists
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn attribute_exists(&self, id: i64) -> AppResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM attributes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to check attribute: {e}")))?;
        Ok(found.is_some())
    }

    /// Create an attribute in a group
    ///
    /// # Errors
    ///
    /// Returns a validation error when the group does not exist
    pub async fn create_attribute(&self, name: &str, group_id: i64) -> AppResult<Attribute> {
        let result =
            sqlx::query("INSERT INTO attributes (name, attribute_group_id) VALUES ($1, $2)")
                .bind(name)
                .bind(group_id)
                .execute(&self.pool)
                .await
                .map_err(|e| map_write_error("Failed to create attribute", &e))?;

        Ok(Attribute {
            id: result.last_insert_rowid(),
            name: name.to_owned(),
            attribute_group_id: group_id,
        })
    }

    /// Rename or regroup an attribute
    ///
    /// # Errors
    ///
    /// Returns not-found for an unknown attribute
    pub async fn update_attribute(&self, id: i64, name: &str, group_id: i64) -> AppResult<Attribute> {
        let result =
            sqlx::query("UPDATE attributes SET name = $1, attribute_group_id = $2 WHERE id = $3")
                .bind(name)
                .bind(group_id)
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| map_write_error("Failed to update attribute", &e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Attribute {id}")));
        }
        Ok(Attribute {
            id,
            name: name.to_owned(),
            attribute_group_id: group_id,
        })
    }

    /// Delete an attribute; its item assignments cascade
    ///
    /// # Errors
    ///
    /// Returns not-found for an unknown attribute
    pub async fn delete_attribute(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM attributes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete attribute: {e}")))?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Attribute {id}")));
        }
        Ok(())
    }

    // ========================================================================
    // Item Attributes
    // ========================================================================

    /// Assign an attribute to an item
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` when the pair is already assigned
    pub async fn assign(&self, item_id: i64, attribute_id: i64) -> AppResult<ItemAttribute> {
        let result =
            sqlx::query("INSERT INTO item_attributes (item_id, attribute_id) VALUES ($1, $2)")
                .bind(item_id)
                .bind(attribute_id)
                .execute(&self.pool)
                .await
                .map_err(|e| map_write_error("Failed to assign attribute", &e))?;

        Ok(ItemAttribute {
            id: result.last_insert_rowid(),
            item_id,
            attribute_id,
        })
    }

    /// Remove an attribute assignment
    ///
    /// # Errors
    ///
    /// Returns not-found for an unknown assignment
    pub async fn unassign(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM item_attributes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to remove item attribute: {e}")))?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Item attribute {id}")));
        }
        Ok(())
    }

    /// Attributes assigned to an item, with attribute and group names
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn item_attributes(&self, item_id: i64) -> AppResult<Vec<ItemAttributeDetail>> {
        let rows = sqlx::query(
            r"
            SELECT ia.id, ia.item_id, ia.attribute_id, a.name AS attribute_name,
                   g.id AS attribute_group_id, g.name AS group_name
            FROM item_attributes ia
            JOIN attributes a ON a.id = ia.attribute_id
            JOIN attribute_groups g ON g.id = a.attribute_group_id
            WHERE ia.item_id = $1
            ORDER BY g.name, a.name
            ",
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list item attributes: {e}")))?;

        Ok(rows
            .iter()
            .map(|row| ItemAttributeDetail {
                id: row.get("id"),
                item_id: row.get("item_id"),
                attribute_id: row.get("attribute_id"),
                attribute_name: row.get("attribute_name"),
                attribute_group_id: row.get("attribute_group_id"),
                group_name: row.get("group_name"),
            })
            .collect())
    }

    fn row_to_group(row: &SqliteRow) -> AttributeGroup {
        AttributeGroup {
            id: row.get("id"),
            name: row.get("name"),
        }
    }

    fn row_to_attribute(row: &SqliteRow) -> Attribute {
        Attribute {
            id: row.get("id"),
            name: row.get("name"),
            attribute_group_id: row.get("attribute_group_id"),
        }
    }
}
