// ABOUTME: Seed command for dovana-cli
// ABOUTME: Ensures the occasion attribute group and its attributes exist
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

use anyhow::Result;
use dovana::{database::Database, services::attributes};

/// Seed the occasion attributes
pub async fn occasions(database: &Database) -> Result<()> {
    let report = attributes::seed_occasions(database).await?;
    println!(
        "Attribute group '{}' (id {}): {} attribute(s) created",
        report.group.name, report.group.id, report.created
    );
    Ok(())
}
