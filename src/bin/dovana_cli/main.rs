// ABOUTME: Dovana CLI - maintenance tool for the gift catalog database
// ABOUTME: Creates users, issues access tokens, seeds attributes and repairs featured positions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors
//!
//! Usage:
//! ```bash
//! # Create an administrator
//! dovana-cli user create --email admin@example.com --name "Admin" --admin
//!
//! # Issue a bearer token for an existing user
//! dovana-cli token issue --email admin@example.com
//!
//! # Seed the occasion attributes
//! dovana-cli seed occasions
//!
//! # Renumber featured rows by id order
//! dovana-cli featured reset-positions
//! ```

mod commands;
mod helpers;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dovana::{
    config::{DatabaseUrl, ServerConfig},
    logging::LoggingConfig,
    server::bootstrap,
};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "dovana-cli",
    about = "Dovana catalog management CLI",
    long_about = "Command-line tool for managing Dovana users, tokens, seed data and featured positions."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database URL override
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// User management commands
    User {
        #[command(subcommand)]
        action: UserCommand,
    },
    /// Access token commands
    Token {
        #[command(subcommand)]
        action: TokenCommand,
    },
    /// Seed data commands
    Seed {
        #[command(subcommand)]
        action: SeedCommand,
    },
    /// Featured carousel maintenance
    Featured {
        #[command(subcommand)]
        action: FeaturedCommand,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum UserCommand {
    /// Create a new user
    Create {
        /// Email address (unique)
        #[arg(long)]
        email: String,

        /// Display name (defaults to the email prefix)
        #[arg(long)]
        name: Option<String>,

        /// Grant catalog administration rights
        #[arg(long)]
        admin: bool,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum TokenCommand {
    /// Issue a bearer token for an existing user
    Issue {
        /// Email of the user
        #[arg(long)]
        email: String,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum SeedCommand {
    /// Create the occasion attribute group and its attributes
    Occasions,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum FeaturedCommand {
    /// Renumber featured rows by id order
    ResetPositions,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::for_cli();
    if cli.verbose {
        "debug".clone_into(&mut logging.level);
    }
    logging.init()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(url) = cli.database_url.as_deref() {
        config.database_url = DatabaseUrl::parse_url(url)?;
    }
    info!("Connecting to database: {}", config.database_url);

    let resources = bootstrap(config).await?;

    match cli.command {
        Command::User { action } => match action {
            UserCommand::Create { email, name, admin } => {
                commands::user::create(&resources.database, email, name, admin).await?;
            }
        },
        Command::Token { action } => match action {
            TokenCommand::Issue { email } => {
                commands::token::issue(&resources, &email).await?;
            }
        },
        Command::Seed { action } => match action {
            SeedCommand::Occasions => commands::seed::occasions(&resources.database).await?,
        },
        Command::Featured { action } => match action {
            FeaturedCommand::ResetPositions => {
                commands::featured::reset_positions(&resources.database).await?;
            }
        },
    }

    Ok(())
}
