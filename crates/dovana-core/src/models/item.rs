// ABOUTME: Catalog item model and request payloads
// ABOUTME: Items belong to a vendor and link out to the vendor's product page
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{check_price, check_url, required_short_text, required_text};
use crate::errors::{AppError, AppResult};

/// A gift listed in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Primary key
    pub id: i64,
    /// Display name
    pub name: String,
    /// Long description
    pub description: String,
    /// Price with two decimals
    pub price: f64,
    /// Optional picture
    pub image_url: Option<String>,
    /// Owning vendor
    pub vendor_id: i64,
    /// Vendor product page the redirect endpoint sends shoppers to
    pub product_url: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Item joined with its vendor's name, as listed publicly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemWithVendor {
    /// The item itself
    #[serde(flatten)]
    pub item: Item,
    /// Name of the owning vendor
    pub vendor_name: String,
}

/// Checked input for inserting or rewriting an item
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    /// Display name
    pub name: String,
    /// Description
    pub description: String,
    /// Price
    pub price: f64,
    /// Optional picture
    pub image_url: Option<String>,
    /// Owning vendor
    pub vendor_id: i64,
    /// Vendor product page
    pub product_url: String,
}

/// Body of `POST /items`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateItemRequest {
    /// Display name
    pub name: Option<String>,
    /// Description
    pub description: Option<String>,
    /// Price
    pub price: Option<f64>,
    /// Optional picture
    pub image_url: Option<String>,
    /// Owning vendor
    pub vendor_id: Option<i64>,
    /// Vendor product page
    pub product_url: Option<String>,
}

fn required_url(field: &str, value: Option<&str>) -> AppResult<String> {
    let url = required_text(field, value)?;
    check_url(field, &url)?;
    Ok(url)
}

fn optional_image_url(value: Option<&str>) -> AppResult<Option<String>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(url) => {
            check_url("image_url", url)?;
            Ok(Some(url.to_owned()))
        }
    }
}

impl CreateItemRequest {
    /// Validate required fields, price and image URL
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first offending field
    pub fn validate(&self) -> AppResult<NewItem> {
        let name = required_short_text("name", self.name.as_deref())?;
        let description = required_text("description", self.description.as_deref())?;
        let price = check_price(
            self.price
                .ok_or_else(|| AppError::validation("The price field is required"))?,
        )?;
        let vendor_id = self
            .vendor_id
            .ok_or_else(|| AppError::validation("The vendor_id field is required"))?;
        let product_url = required_url("product_url", self.product_url.as_deref())?;
        let image_url = optional_image_url(self.image_url.as_deref())?;

        Ok(NewItem {
            name,
            description,
            price,
            image_url,
            vendor_id,
            product_url,
        })
    }

    /// Validate a product read from a vendor feed
    ///
    /// Feeds may leave out the description and the product page; both are
    /// stored empty. URLs that are present must still be `http(s)`.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first offending field
    pub fn validate_feed_product(&self) -> AppResult<NewItem> {
        let present = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_owned)
        };

        let product_url = match present(self.product_url.as_deref()) {
            Some(url) => {
                check_url("product_url", &url)?;
                url
            }
            None => String::new(),
        };

        Ok(NewItem {
            name: required_short_text("name", self.name.as_deref())?,
            description: present(self.description.as_deref()).unwrap_or_default(),
            price: check_price(self.price.unwrap_or(0.0))?,
            image_url: optional_image_url(self.image_url.as_deref())?,
            vendor_id: self
                .vendor_id
                .ok_or_else(|| AppError::validation("The vendor_id field is required"))?,
            product_url,
        })
    }
}

/// Body of `PUT /items/:id`; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateItemRequest {
    /// New name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New price
    pub price: Option<f64>,
    /// New picture (empty string clears it)
    pub image_url: Option<String>,
    /// New vendor
    pub vendor_id: Option<i64>,
    /// New product page
    pub product_url: Option<String>,
}

impl UpdateItemRequest {
    /// Apply the present fields on top of an existing item
    ///
    /// # Errors
    ///
    /// Returns a validation error when a present field is invalid
    pub fn apply_to(&self, item: &Item) -> AppResult<NewItem> {
        Ok(NewItem {
            name: match &self.name {
                Some(name) => required_short_text("name", Some(name))?,
                None => item.name.clone(),
            },
            description: match &self.description {
                Some(description) => required_text("description", Some(description))?,
                None => item.description.clone(),
            },
            price: match self.price {
                Some(price) => check_price(price)?,
                None => item.price,
            },
            image_url: match &self.image_url {
                Some(url) => optional_image_url(Some(url))?,
                None => item.image_url.clone(),
            },
            vendor_id: self.vendor_id.unwrap_or(item.vendor_id),
            product_url: match &self.product_url {
                Some(url) => required_url("product_url", Some(url))?,
                None => item.product_url.clone(),
            },
        })
    }
}
