// ABOUTME: Click-through logging for vendor product redirects
// ABOUTME: Fingerprints clicks with SHA-256 and suppresses repeats inside a short window
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::constants::limits::{MAX_IP_LENGTH, MAX_NAME_LENGTH, REDIRECT_DEDUP_WINDOW_SECS};
use crate::database::{Database, RedirectClick};
use crate::errors::{AppError, AppResult};
use crate::models::RedirectOutcome;

/// Message returned for a repeated click
pub const DUPLICATE_MESSAGE: &str = "Duplicate redirect attempt";

/// Hex SHA-256 of address, user agent and unix second
#[must_use]
pub fn click_fingerprint(click: &RedirectClick, at: DateTime<Utc>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(click.ip_address.as_deref().unwrap_or_default());
    hasher.update(click.user_agent.as_deref().unwrap_or_default());
    hasher.update(at.timestamp().to_string());
    hex::encode(hasher.finalize())
}

fn truncate(value: Option<String>, max_chars: usize) -> Option<String> {
    value.map(|v| v.chars().take(max_chars).collect())
}

/// Log a click on an item and return where to send the shopper
///
/// # Errors
///
/// Returns not-found for an unknown item
pub async fn record_redirect(
    database: &Database,
    item_id: i64,
    click: RedirectClick,
    at: DateTime<Utc>,
) -> AppResult<RedirectOutcome> {
    let item = database
        .items()
        .get(item_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Item {item_id}")))?;

    let click = RedirectClick {
        ip_address: truncate(click.ip_address, MAX_IP_LENGTH),
        user_agent: click.user_agent,
        referrer: truncate(click.referrer, MAX_NAME_LENGTH),
    };
    let unique_hash = click_fingerprint(&click, at);
    let duplicate = RedirectOutcome::Duplicate {
        message: DUPLICATE_MESSAGE.to_owned(),
    };

    let redirects = database.redirects();
    if let Some(logged_at) = redirects.logged_at(&unique_hash).await? {
        if at - logged_at <= Duration::seconds(REDIRECT_DEDUP_WINDOW_SECS) {
            debug!(item_id, "Duplicate redirect suppressed");
            return Ok(duplicate);
        }
    }

    if !redirects.record(item_id, &unique_hash, &click, at).await? {
        return Ok(duplicate);
    }

    Ok(RedirectOutcome::Logged {
        unique_hash,
        product_url: item.product_url,
    })
}
