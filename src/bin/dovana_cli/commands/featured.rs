// ABOUTME: Featured carousel maintenance command for dovana-cli
// ABOUTME: Renumbers featured rows by id order and prints the position changes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

use anyhow::Result;
use dovana::{database::Database, services::featured};

use crate::helpers::display::display_position_changes;

/// Renumber featured rows `0..n-1` in id order
pub async fn reset_positions(database: &Database) -> Result<()> {
    let changes = featured::reset_positions(database).await?;
    display_position_changes(&changes);
    Ok(())
}
