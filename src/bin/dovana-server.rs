// ABOUTME: Server binary for the Dovana gift catalog HTTP API
// ABOUTME: Loads configuration from the environment, opens the database and serves until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

//! # Dovana Server Binary
//!
//! Starts the catalog API with token authentication, rate limiting and
//! `SQLite` storage.

use anyhow::Result;
use clap::Parser;
use dovana::{
    config::ServerConfig,
    logging,
    server::{bootstrap, CatalogServer},
};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "dovana-server")]
#[command(about = "Dovana - gift catalog HTTP API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override the database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(url) = args.database_url {
        config.database_url = dovana::config::DatabaseUrl::parse_url(&url)?;
    }
    config.validate()?;

    info!("Starting Dovana catalog server");
    info!("{}", config.summary());

    let resources = bootstrap(config).await?;
    if let Err(e) = CatalogServer::new(resources).run().await {
        error!(error = %e, "Server stopped with an error");
        return Err(e);
    }

    Ok(())
}
