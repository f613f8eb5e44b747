// ABOUTME: Logging configuration and structured logging setup for the catalog service
// ABOUTME: Chooses an output format from the environment and emits audit events for admin actions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

//! Structured logging configuration
//!
//! The server reads `RUST_LOG`, `LOG_FORMAT`, `ENVIRONMENT`, `SERVICE_NAME`
//! and the `LOG_INCLUDE_*` switches; the CLI logs compactly to stderr so its
//! stdout stays readable.

use std::env;
use std::io;

use anyhow::Result;
use tracing::{debug, info, warn};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use crate::constants::service_names;

/// Crates that are too chatty at `debug`
const QUIET_TARGETS: [&str; 4] = ["hyper=warn", "sqlx=warn", "tower=warn", "tower_http=info"];

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One `JSON` object per line, for log shippers
    Json,
    /// Multi-line human output
    Pretty,
    /// Single-line output on stderr
    Compact,
}

impl LogFormat {
    fn parse(value: Option<&str>) -> Self {
        match value.map(str::to_ascii_lowercase).as_deref() {
            Some("json") => Self::Json,
            Some("compact") => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

/// Optional fields attached to every event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogDecorations {
    /// Source file and line
    pub location: bool,
    /// Thread id and name
    pub thread: bool,
    /// Span open and close events
    pub spans: bool,
}

impl LogDecorations {
    fn from_env(production: bool) -> Self {
        let switch = |name: &str| production || env::var(name).is_ok();
        Self {
            location: switch("LOG_INCLUDE_LOCATION"),
            thread: switch("LOG_INCLUDE_THREAD"),
            spans: switch("LOG_INCLUDE_SPANS"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default level for `dovana` targets
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Extra event fields
    pub decorations: LogDecorations,
    /// Name reported at startup
    pub service_name: String,
    /// Deployment environment
    pub environment: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
            decorations: LogDecorations::default(),
            service_name: service_names::DOVANA_SERVER.into(),
            environment: "development".into(),
        }
    }
}

impl LoggingConfig {
    /// Read the server's logging settings from the environment
    ///
    /// `ENVIRONMENT=production` turns on every decoration.
    #[must_use]
    pub fn from_env() -> Self {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let production = environment == "production";

        Self {
            level: env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
            format: LogFormat::parse(env::var("LOG_FORMAT").ok().as_deref()),
            decorations: LogDecorations::from_env(production),
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| service_names::DOVANA_SERVER.into()),
            environment,
        }
    }

    /// Compact, warn-level logging for the maintenance CLI
    #[must_use]
    pub fn for_cli() -> Self {
        Self {
            level: env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
            format: LogFormat::Compact,
            ..Self::default()
        }
    }

    fn env_filter(&self) -> EnvFilter {
        let mut filter = EnvFilter::new(&self.level);
        for directive in QUIET_TARGETS {
            if let Ok(parsed) = directive.parse() {
                filter = filter.add_directive(parsed);
            }
        }
        filter
    }

    fn output_layer(&self) -> BoxedLayer {
        let d = self.decorations;
        let span_events = if d.spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        match self.format {
            LogFormat::Compact => fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(io::stderr)
                .boxed(),
            LogFormat::Json => fmt::layer()
                .json()
                .with_file(d.location)
                .with_line_number(d.location)
                .with_thread_ids(d.thread)
                .with_thread_names(d.thread)
                .with_span_events(span_events)
                .with_writer(io::stdout)
                .boxed(),
            LogFormat::Pretty => fmt::layer()
                .with_file(d.location)
                .with_line_number(d.location)
                .with_thread_ids(d.thread)
                .with_thread_names(d.thread)
                .with_span_events(span_events)
                .with_writer(io::stdout)
                .boxed(),
        }
    }

    /// Install the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        tracing_subscriber::registry()
            .with(self.output_layer())
            .with(self.env_filter())
            .try_init()?;

        info!(
            service.name = %self.service_name,
            service.version = env!("CARGO_PKG_VERSION"),
            environment = %self.environment,
            log.level = %self.level,
            "Logging initialized"
        );
        debug!(format = ?self.format, decorations = ?self.decorations, "Log output");
        Ok(())
    }
}

/// Initialize logging from environment
///
/// # Errors
///
/// Returns an error if logging initialization fails
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}

/// Structured audit events emitted by the catalog
pub struct AppLogger;

impl AppLogger {
    /// Log an admin mutation of catalog data
    pub fn log_admin_action(actor: &str, action: &str, entity: &str, entity_id: i64) {
        info!(
            admin.actor = %actor,
            admin.action = %action,
            admin.entity = %entity,
            admin.entity_id = entity_id,
            "Admin action"
        );
    }

    /// Log a change to the featured carousel order
    pub fn log_featured_change(actor: &str, operation: &str, featured_id: i64, changed_rows: usize) {
        info!(
            admin.actor = %actor,
            featured.operation = %operation,
            featured.id = featured_id,
            featured.changed_rows = changed_rows,
            "Featured lineup changed"
        );
    }

    /// Log denied access and rejected credentials
    pub fn log_security_event(event_type: &str, details: &str, user_id: Option<&str>) {
        warn!(
            security.event = %event_type,
            security.details = %details,
            user.id = user_id.unwrap_or("unknown"),
            "Security event"
        );
    }
}
