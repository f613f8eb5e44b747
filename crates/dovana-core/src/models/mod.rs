// ABOUTME: Core data models for the Dovana gift catalog
// ABOUTME: Re-exports vendor, item, featured, attribute, wishlist, redirect and user types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

//! # Data Models
//!
//! Plain serializable structures shared by the database layer, the services
//! and the HTTP routes. Request types carry optional fields and expose a
//! `validate` method that turns them into checked input, so validation
//! messages are the same whichever surface the request came through.

mod attribute;
mod featured;
mod item;
mod redirect;
mod user;
mod vendor;
mod wishlist;

// Vendor domain
pub use vendor::{CreateVendorRequest, NewVendor, UpdateVendorRequest, Vendor};

// Item domain
pub use item::{CreateItemRequest, Item, ItemWithVendor, NewItem, UpdateItemRequest};

// Featured carousel
pub use featured::{
    CreateFeaturedItemRequest, FeaturedItem, FeaturedItemView, MoveDirection, NewFeaturedItem,
    ReorderFeaturedItemRequest,
};

// Attribute domain
pub use attribute::{
    Attribute, AttributeGroup, AttributeGroupRequest, AttributeRequest, ItemAttribute,
    ItemAttributeDetail, ItemAttributeRequest,
};

// Wishlist domain
pub use wishlist::{WishlistEntry, WishlistStatus};

// Redirect tracking
pub use redirect::{RedirectLog, RedirectOutcome};

// Users
pub use user::User;

use crate::constants::limits::MAX_NAME_LENGTH;
use crate::errors::{AppError, AppResult};

/// Require a non-blank string no longer than [`MAX_NAME_LENGTH`] characters
pub(crate) fn required_short_text(field: &str, value: Option<&str>) -> AppResult<String> {
    let value = required_text(field, value)?;
    check_length(field, &value)?;
    Ok(value)
}

/// Require a non-blank string
pub(crate) fn required_text(field: &str, value: Option<&str>) -> AppResult<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_owned()),
        _ => Err(AppError::validation(format!("The {field} field is required"))),
    }
}

pub(crate) fn check_length(field: &str, value: &str) -> AppResult<()> {
    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(AppError::validation(format!(
            "The {field} may not be greater than {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Accept only absolute `http` or `https` URLs with a host
pub(crate) fn check_url(field: &str, value: &str) -> AppResult<()> {
    let invalid = || AppError::validation(format!("The {field} must be a valid URL"));
    let parsed = url::Url::parse(value).map_err(|_| invalid())?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid());
    }
    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(invalid()),
    }
}

/// Prices are non-negative with at most two decimals
pub(crate) fn check_price(value: f64) -> AppResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::validation(
            "The price must be a number greater than or equal to 0",
        ));
    }
    Ok((value * 100.0).round() / 100.0)
}
