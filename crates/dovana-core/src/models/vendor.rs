// ABOUTME: Vendor model and request payloads
// ABOUTME: Vendors own catalog items; deleting a vendor removes its items
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{check_url, required_short_text, required_text};
use crate::errors::AppResult;

/// A shop selling items listed in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
    /// Primary key
    pub id: i64,
    /// Display name
    pub name: String,
    /// Free-form contact information
    pub contact_details: String,
    /// Vendor website
    pub website: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Checked input for creating a vendor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVendor {
    /// Display name
    pub name: String,
    /// Contact information
    pub contact_details: String,
    /// Website
    pub website: String,
}

fn website(value: Option<&str>) -> AppResult<String> {
    let url = required_short_text("website", value)?;
    check_url("website", &url)?;
    Ok(url)
}

/// Body of `POST /vendors`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateVendorRequest {
    /// Display name
    pub name: Option<String>,
    /// Contact information
    pub contact_details: Option<String>,
    /// Website
    pub website: Option<String>,
}

impl CreateVendorRequest {
    /// Validate required fields and lengths
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first offending field
    pub fn validate(&self) -> AppResult<NewVendor> {
        Ok(NewVendor {
            name: required_short_text("name", self.name.as_deref())?,
            contact_details: required_text("contact_details", self.contact_details.as_deref())?,
            website: website(self.website.as_deref())?,
        })
    }
}

/// Body of `PUT /vendors/:id`; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateVendorRequest {
    /// New name
    pub name: Option<String>,
    /// New contact information
    pub contact_details: Option<String>,
    /// New website
    pub website: Option<String>,
}

impl UpdateVendorRequest {
    /// Apply the present fields on top of an existing vendor
    ///
    /// # Errors
    ///
    /// Returns a validation error when a present field is blank or too long
    pub fn apply_to(&self, vendor: &Vendor) -> AppResult<NewVendor> {
        let name = match &self.name {
            Some(name) => required_short_text("name", Some(name))?,
            None => vendor.name.clone(),
        };
        let contact_details = match &self.contact_details {
            Some(details) => required_text("contact_details", Some(details))?,
            None => vendor.contact_details.clone(),
        };
        let website = match &self.website {
            Some(url) => website(Some(url))?,
            None => vendor.website.clone(),
        };
        Ok(NewVendor {
            name,
            contact_details,
            website,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vendor() -> Vendor {
        Vendor {
            id: 1,
            name: "Gift Shop".into(),
            contact_details: "info@gift.lt".into(),
            website: "https://gift.lt".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_create_requires_all_fields() {
        let request = CreateVendorRequest {
            name: Some("Gift Shop".into()),
            contact_details: None,
            website: Some("https://gift.lt".into()),
        };
        let err = request.validate().unwrap_err();
        assert!(err.message.contains("contact_details"));
    }

    #[test]
    fn test_partial_update_keeps_absent_fields() {
        let update = UpdateVendorRequest {
            name: Some("Renamed".into()),
            ..UpdateVendorRequest::default()
        };
        let merged = update.apply_to(&vendor()).unwrap();
        assert_eq!(merged.name, "Renamed");
        assert_eq!(merged.website, "https://gift.lt");
    }

    #[test]
    fn test_website_must_be_http_url() {
        let request = CreateVendorRequest {
            name: Some("Gift Shop".into()),
            contact_details: Some("info@gift.lt".into()),
            website: Some("gift shop".into()),
        };
        assert!(request.validate().is_err());

        let update = UpdateVendorRequest {
            website: Some("ftp://gift.lt".into()),
            ..UpdateVendorRequest::default()
        };
        assert!(update.apply_to(&vendor()).is_err());
    }
}
