// ABOUTME: Redirect click log model and the outcome of a redirect request
// ABOUTME: Each click is fingerprinted so rapid repeats are not logged twice
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A logged click-through to a vendor product page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectLog {
    /// Primary key
    pub id: i64,
    /// Clicked item
    pub item_id: i64,
    /// Click time
    pub timestamp: DateTime<Utc>,
    /// Client address
    pub ip_address: Option<String>,
    /// Client user agent
    pub user_agent: Option<String>,
    /// Referring page
    pub referrer: Option<String>,
    /// Click fingerprint
    pub unique_hash: String,
}

/// Result of handling a redirect request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RedirectOutcome {
    /// A new click was logged
    Logged {
        /// Click fingerprint
        unique_hash: String,
        /// Where to send the shopper
        product_url: String,
    },
    /// The same click was seen within the dedup window
    Duplicate {
        /// Human-readable notice
        message: String,
    },
}
