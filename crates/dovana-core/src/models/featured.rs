// ABOUTME: Featured carousel models and request payloads
// ABOUTME: Featured rows reference an item, carry a display window and a dense position
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{AppError, AppResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A row of the featured carousel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedItem {
    /// Primary key
    pub id: i64,
    /// Featured catalog item
    pub item_id: i64,
    /// First day the item is featured
    pub start_date: NaiveDate,
    /// Last day the item is featured
    pub end_date: NaiveDate,
    /// Zero-based display position
    pub position: i64,
}

/// Featured row joined with its item and vendor, in display order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturedItemView {
    /// Featured row id
    pub id: i64,
    /// Item id
    pub item_id: i64,
    /// Item name
    pub name: String,
    /// Vendor name
    pub vendor_name: String,
    /// Item description
    pub description: String,
    /// Item price
    pub price: f64,
    /// Item picture
    pub image_url: Option<String>,
    /// Vendor product page
    pub product_url: String,
    /// First featured day
    pub start_date: NaiveDate,
    /// Last featured day
    pub end_date: NaiveDate,
    /// Display position
    pub position: i64,
}

/// Checked input for a new featured row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewFeaturedItem {
    /// Item to feature
    pub item_id: i64,
    /// First featured day
    pub start_date: NaiveDate,
    /// Last featured day, strictly after `start_date`
    pub end_date: NaiveDate,
}

/// Body of `POST /featured-items`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateFeaturedItemRequest {
    /// Item to feature
    pub item_id: Option<i64>,
    /// `YYYY-MM-DD`
    pub start_date: Option<String>,
    /// `YYYY-MM-DD`
    pub end_date: Option<String>,
}

fn parse_date(field: &str, value: Option<&str>) -> AppResult<NaiveDate> {
    let raw = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::validation(format!("The {field} field is required")))?;
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
        AppError::validation(format!("The {field} must be a date in YYYY-MM-DD format"))
    })
}

impl CreateFeaturedItemRequest {
    /// Check field presence, date format and date ordering
    ///
    /// Whether `item_id` references an existing item is checked by the
    /// service, which needs the database.
    ///
    /// # Errors
    ///
    /// Returns a validation error for the first failing rule
    pub fn validate(&self) -> AppResult<NewFeaturedItem> {
        let item_id = self
            .item_id
            .ok_or_else(|| AppError::validation("The item_id field is required"))?;
        let start_date = parse_date("start_date", self.start_date.as_deref())?;
        let end_date = parse_date("end_date", self.end_date.as_deref())?;

        if end_date <= start_date {
            return Err(AppError::validation(
                "The end_date must be a date after start_date",
            ));
        }

        Ok(NewFeaturedItem {
            item_id,
            start_date,
            end_date,
        })
    }
}

/// Direction of a carousel move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    /// Toward position 0
    Up,
    /// Toward the last position
    Down,
}

impl MoveDirection {
    /// String form used in requests and logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for MoveDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MoveDirection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => Err(AppError::validation(format!(
                "The direction must be 'up' or 'down', got '{other}'"
            ))),
        }
    }
}

/// Body of `POST /featured-items/reorder`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReorderFeaturedItemRequest {
    /// Featured row to move
    pub id: Option<i64>,
    /// `up` or `down`
    pub direction: Option<String>,
}

impl ReorderFeaturedItemRequest {
    /// Parse the row id and direction
    ///
    /// # Errors
    ///
    /// Returns a validation error when either field is missing or the
    /// direction is unknown
    pub fn validate(&self) -> AppResult<(i64, MoveDirection)> {
        let id = self
            .id
            .ok_or_else(|| AppError::validation("The id field is required"))?;
        let direction = self
            .direction
            .as_deref()
            .ok_or_else(|| AppError::validation("The direction field is required"))?
            .parse()?;
        Ok((id, direction))
    }
}
