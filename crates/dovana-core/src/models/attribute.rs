// ABOUTME: Attribute groups, attributes and their assignment to items
// ABOUTME: Groups hold named attributes (occasions etc.) that tag catalog items
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

use serde::{Deserialize, Serialize};

use super::required_short_text;
use crate::errors::{AppError, AppResult};

/// Named group of attributes, e.g. "Proga"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeGroup {
    /// Primary key
    pub id: i64,
    /// Unique name
    pub name: String,
}

/// Attribute inside a group, e.g. "Gimtadienis"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Primary key
    pub id: i64,
    /// Display name
    pub name: String,
    /// Owning group
    pub attribute_group_id: i64,
}

/// Assignment of an attribute to an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAttribute {
    /// Primary key
    pub id: i64,
    /// Tagged item
    pub item_id: i64,
    /// Assigned attribute
    pub attribute_id: i64,
}

/// Item attribute with attribute and group names resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAttributeDetail {
    /// Assignment id
    pub id: i64,
    /// Tagged item
    pub item_id: i64,
    /// Assigned attribute
    pub attribute_id: i64,
    /// Attribute name
    pub attribute_name: String,
    /// Group id
    pub attribute_group_id: i64,
    /// Group name
    pub group_name: String,
}

/// Body of group create and update
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttributeGroupRequest {
    /// Group name
    pub name: Option<String>,
}

impl AttributeGroupRequest {
    /// Validate the group name
    ///
    /// # Errors
    ///
    /// Returns a validation error when the name is blank or too long
    pub fn validate(&self) -> AppResult<String> {
        required_short_text("name", self.name.as_deref())
    }
}

/// Body of attribute create and update
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttributeRequest {
    /// Attribute name
    pub name: Option<String>,
    /// Owning group
    pub attribute_group_id: Option<i64>,
}

impl AttributeRequest {
    /// Validate name and group reference
    ///
    /// # Errors
    ///
    /// Returns a validation error when a field is missing
    pub fn validate(&self) -> AppResult<(String, i64)> {
        let name = required_short_text("name", self.name.as_deref())?;
        let group_id = self
            .attribute_group_id
            .ok_or_else(|| AppError::validation("The attribute_group_id field is required"))?;
        Ok((name, group_id))
    }
}

/// Body of `POST /item-attributes`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemAttributeRequest {
    /// Item to tag
    pub item_id: Option<i64>,
    /// Attribute to assign
    pub attribute_id: Option<i64>,
}

impl ItemAttributeRequest {
    /// Validate field presence
    ///
    /// # Errors
    ///
    /// Returns a validation error when a field is missing
    pub fn validate(&self) -> AppResult<(i64, i64)> {
        let item_id = self
            .item_id
            .ok_or_else(|| AppError::validation("The item_id field is required"))?;
        let attribute_id = self
            .attribute_id
            .ok_or_else(|| AppError::validation("The attribute_id field is required"))?;
        Ok((item_id, attribute_id))
    }
}
