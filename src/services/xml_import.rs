// ABOUTME: Bulk product import from vendor XML feeds using a streaming quick-xml reader
// ABOUTME: Parses <product> elements, validates each one and inserts all items atomically
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

//! # XML Product Import
//!
//! Feed layout:
//!
//! ```xml
//! <products>
//!   <product>
//!     <title>Puodelis</title>
//!     <description>Keramikinis puodelis</description>
//!     <price>12.50</price>
//!     <image_url>https://shop.lt/p.jpg</image_url>
//!     <product_url>https://shop.lt/p</product_url>
//!   </product>
//! </products>
//! ```
//!
//! The root element name is not checked; every direct `<product>` child of
//! the root is imported. Products are numbered from 1 in error messages.

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::info;

use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::middleware::AdminContext;
use crate::models::{CreateItemRequest, Item, NewItem};

/// Message for documents that are not a product feed
pub const INVALID_XML_MESSAGE: &str = "Invalid XML file format";

/// Raw text fields of one `<product>` element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductRecord {
    /// `<title>`
    pub title: Option<String>,
    /// `<description>`
    pub description: Option<String>,
    /// `<price>`
    pub price: Option<String>,
    /// `<image_url>`
    pub image_url: Option<String>,
    /// `<product_url>`
    pub product_url: Option<String>,
}

impl ProductRecord {
    fn field_mut(&mut self, name: &[u8]) -> Option<&mut Option<String>> {
        match name {
            b"title" => Some(&mut self.title),
            b"description" => Some(&mut self.description),
            b"price" => Some(&mut self.price),
            b"image_url" => Some(&mut self.image_url),
            b"product_url" => Some(&mut self.product_url),
            _ => None,
        }
    }

    /// Validate this record as an item of `vendor_id`
    ///
    /// # Errors
    ///
    /// Returns `400` naming the product's 1-based `index`
    pub fn to_new_item(&self, index: usize, vendor_id: i64) -> AppResult<NewItem> {
        let invalid = |reason: String| AppError::invalid_format(format!("Product {index}: {reason}"));

        if self.title.as_deref().map_or(true, |t| t.trim().is_empty()) {
            return Err(invalid("title is required".to_owned()));
        }

        let price = match self.price.as_deref().map(str::trim) {
            None | Some("") => 0.0,
            Some(raw) => raw
                .parse::<f64>()
                .map_err(|_| invalid(format!("price '{raw}' is not a number")))?,
        };

        CreateItemRequest {
            name: self.title.clone(),
            description: self.description.clone(),
            price: Some(price),
            image_url: self.image_url.clone(),
            vendor_id: Some(vendor_id),
            product_url: self.product_url.clone(),
        }
        .validate_feed_product()
        .map_err(|e| invalid(e.message))
    }
}

fn invalid_xml() -> AppError {
    AppError::invalid_format(INVALID_XML_MESSAGE)
}

/// Parse a product feed into raw records
///
/// # Errors
///
/// Returns `400` "Invalid XML file format" for malformed XML or a document
/// without `<product>` elements
pub fn parse_products(xml: &str) -> AppResult<Vec<ProductRecord>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut products = Vec::new();
    let mut depth = 0_usize;
    let mut current: Option<ProductRecord> = None;
    let mut field: Option<Vec<u8>> = None;

    loop {
        match reader.read_event().map_err(|_| invalid_xml())? {
            Event::Start(start) => {
                depth += 1;
                let name = start.name().as_ref().to_vec();
                if depth == 2 && name == b"product" {
                    current = Some(ProductRecord::default());
                } else if depth == 3 && current.is_some() {
                    field = Some(name);
                }
            }
            Event::Empty(empty) => {
                if depth == 1 && empty.name().as_ref() == b"product" {
                    products.push(ProductRecord::default());
                }
            }
            Event::Text(text) => {
                if let (Some(record), Some(name)) = (current.as_mut(), field.as_deref()) {
                    let value = text.unescape().map_err(|_| invalid_xml())?;
                    if let Some(slot) = record.field_mut(name) {
                        slot.get_or_insert_with(String::new).push_str(&value);
                    }
                }
            }
            Event::CData(data) => {
                if let (Some(record), Some(name)) = (current.as_mut(), field.as_deref()) {
                    let value = String::from_utf8(data.into_inner().into_owned())
                        .map_err(|_| invalid_xml())?;
                    if let Some(slot) = record.field_mut(name) {
                        slot.get_or_insert_with(String::new).push_str(&value);
                    }
                }
            }
            Event::End(_) => {
                if depth == 3 {
                    field = None;
                } else if depth == 2 {
                    if let Some(record) = current.take() {
                        products.push(record);
                    }
                }
                depth = depth.checked_sub(1).ok_or_else(invalid_xml)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth != 0 || products.is_empty() {
        return Err(invalid_xml());
    }
    Ok(products)
}

/// Import a vendor feed; either every product is stored or none
///
/// # Errors
///
/// Returns `422` for an unknown vendor and `400` for an invalid feed or product
pub async fn import_products(
    database: &Database,
    admin: &AdminContext,
    vendor_id: i64,
    xml: &str,
) -> AppResult<Vec<Item>> {
    if database.vendors().get(vendor_id).await?.is_none() {
        return Err(AppError::validation(
            "The selected vendor_id does not reference an existing vendor",
        ));
    }

    let items = parse_products(xml)?
        .iter()
        .enumerate()
        .map(|(i, record)| record.to_new_item(i + 1, vendor_id))
        .collect::<AppResult<Vec<_>>>()?;

    let created = database.items().create_many(&items).await?;

    info!(vendor_id, imported = created.len(), "XML product feed imported");
    AppLogger::log_admin_action(&admin.actor(), "import", "vendor_items", vendor_id);
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<products>
  <product>
    <title>Puodelis</title>
    <description>Keramikinis &amp; rankų darbo</description>
    <price>12.50</price>
    <image_url>https://shop.lt/p.jpg</image_url>
    <product_url>https://shop.lt/p</product_url>
  </product>
  <product>
    <title><![CDATA[Žvakė <kvapni>]]></title>
    <description>Soja</description>
    <price>7</price>
    <image_url/>
    <product_url>https://shop.lt/z</product_url>
  </product>
</products>"#;

    #[test]
    fn test_parses_products_in_order() {
        let products = parse_products(FEED).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].title.as_deref(), Some("Puodelis"));
        assert_eq!(
            products[0].description.as_deref(),
            Some("Keramikinis & rankų darbo")
        );
        assert_eq!(products[1].title.as_deref(), Some("Žvakė <kvapni>"));
        assert_eq!(products[1].image_url, None);
    }

    #[test]
    fn test_records_become_items() {
        let products = parse_products(FEED).unwrap();
        let item = products[1].to_new_item(2, 9).unwrap();
        assert_eq!(item.vendor_id, 9);
        assert!((item.price - 7.0).abs() < f64::EPSILON);
        assert_eq!(item.image_url, None);
    }

    #[test]
    fn test_title_and_price_are_enough() {
        let products = parse_products(
            "<products><product><title>Atvirukas</title><price>2.5</price></product></products>",
        )
        .unwrap();
        let item = products[0].to_new_item(1, 4).unwrap();
        assert_eq!(item.name, "Atvirukas");
        assert_eq!(item.description, "");
        assert_eq!(item.product_url, "");
    }

    #[test]
    fn test_malformed_or_empty_documents_are_rejected() {
        for xml in ["<products><product>", "not xml at all", "<products></products>", ""] {
            let err = parse_products(xml).unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidFormat);
            assert_eq!(err.message, INVALID_XML_MESSAGE);
        }
    }

    #[test]
    fn test_product_errors_name_the_index() {
        let record = ProductRecord {
            title: Some("Vaza".into()),
            price: Some("abc".into()),
            ..ProductRecord::default()
        };
        let err = record.to_new_item(3, 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
        assert!(err.message.starts_with("Product 3: price"));

        let untitled = ProductRecord::default().to_new_item(1, 1).unwrap_err();
        assert_eq!(untitled.message, "Product 1: title is required");
    }
}
