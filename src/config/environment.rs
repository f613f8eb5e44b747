// ABOUTME: Environment-based configuration for the HTTP server and CLI
// ABOUTME: Typed settings for ports, database URL, JWT, CORS, rate limits and upload size
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

use crate::constants::{defaults, env_vars, limits};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Path to `SQLite` database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string
    ///
    /// Anything without a `sqlite:` prefix is treated as a file path.
    ///
    /// # Errors
    ///
    /// Returns a config error for an empty string or a non-SQLite scheme
    pub fn parse_url(s: &str) -> AppResult<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AppError::config("DATABASE_URL must not be empty"));
        }
        if let Some(rest) = s.strip_prefix("sqlite:") {
            let path_str = rest.trim_start_matches("//");
            if path_str == ":memory:" || path_str.is_empty() {
                return Ok(Self::Memory);
            }
            return Ok(Self::SQLite {
                path: PathBuf::from(path_str),
            });
        }
        if s.contains("://") {
            return Err(AppError::config(format!(
                "Unsupported database URL '{s}': only SQLite is supported"
            )));
        }
        Ok(Self::SQLite {
            path: PathBuf::from(s),
        })
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".into(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./data/dovana.db"),
        }
    }
}

impl Display for DatabaseUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.to_connection_string())
    }
}

/// JWT settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Signing secret; `None` means use the secret persisted in the database
    #[serde(skip_serializing)]
    pub jwt_secret: Option<String>,
    /// Token lifetime in hours
    pub jwt_expiry_hours: i64,
}

/// Per-minute request budgets
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    pub enabled: bool,
    /// Budget for public and shopper routes
    pub public_per_minute: u32,
    /// Budget for admin routes
    pub admin_per_minute: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            public_per_minute: defaults::PUBLIC_REQUESTS_PER_MINUTE,
            admin_per_minute: defaults::ADMIN_REQUESTS_PER_MINUTE,
        }
    }
}

/// HTTP hardening settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// CORS allowed origins (`*` for any)
    pub cors_origins: Vec<String>,
    /// Rate limiting configuration
    pub rate_limit: RateLimitConfig,
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
    /// Maximum request body size for uploads
    pub max_upload_bytes: usize,
}

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// HTTP API port
    pub http_port: u16,
    /// Database location
    pub database_url: DatabaseUrl,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// Security settings
    pub security: SecurityConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a config error when a variable is present but cannot be parsed
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            host: env_var_or(env_vars::HOST, defaults::HOST),
            http_port: parse_env(env_vars::HTTP_PORT, defaults::HTTP_PORT)?,
            database_url: DatabaseUrl::parse_url(&env_var_or(
                env_vars::DATABASE_URL,
                defaults::DATABASE_URL,
            ))?,
            auth: AuthConfig {
                jwt_secret: env::var(env_vars::JWT_SECRET)
                    .ok()
                    .filter(|secret| !secret.trim().is_empty()),
                jwt_expiry_hours: parse_env(env_vars::JWT_EXPIRY_HOURS, defaults::JWT_EXPIRY_HOURS)?,
            },
            security: SecurityConfig {
                cors_origins: parse_origins(&env_var_or(env_vars::CORS_ALLOWED_ORIGINS, "*")),
                rate_limit: RateLimitConfig {
                    enabled: parse_env(env_vars::RATE_LIMIT_ENABLED, true)?,
                    public_per_minute: parse_env(
                        env_vars::RATE_LIMIT_PUBLIC_PER_MINUTE,
                        defaults::PUBLIC_REQUESTS_PER_MINUTE,
                    )?,
                    admin_per_minute: parse_env(
                        env_vars::RATE_LIMIT_ADMIN_PER_MINUTE,
                        defaults::ADMIN_REQUESTS_PER_MINUTE,
                    )?,
                },
                request_timeout_secs: parse_env(
                    env_vars::REQUEST_TIMEOUT_SECS,
                    defaults::REQUEST_TIMEOUT_SECS,
                )?,
                max_upload_bytes: parse_env(
                    env_vars::MAX_UPLOAD_BYTES,
                    limits::DEFAULT_MAX_UPLOAD_BYTES,
                )?,
            },
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Configuration for tests: in-memory database, fixed secret, no rate limits
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            host: defaults::HOST.to_owned(),
            http_port: 0,
            database_url: DatabaseUrl::Memory,
            auth: AuthConfig {
                jwt_secret: Some("test-secret-for-dovana-integration-tests".to_owned()),
                jwt_expiry_hours: defaults::JWT_EXPIRY_HOURS,
            },
            security: SecurityConfig {
                cors_origins: vec!["*".to_owned()],
                rate_limit: RateLimitConfig {
                    enabled: false,
                    ..RateLimitConfig::default()
                },
                request_timeout_secs: defaults::REQUEST_TIMEOUT_SECS,
                max_upload_bytes: limits::DEFAULT_MAX_UPLOAD_BYTES,
            },
        }
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns a config error for values that would make the server unusable
    pub fn validate(&self) -> AppResult<()> {
        if self.auth.jwt_expiry_hours <= 0 {
            return Err(AppError::config("JWT_EXPIRY_HOURS must be positive"));
        }
        if self.security.rate_limit.enabled
            && (self.security.rate_limit.public_per_minute == 0
                || self.security.rate_limit.admin_per_minute == 0)
        {
            return Err(AppError::config(
                "Rate limits must be greater than zero when rate limiting is enabled",
            ));
        }
        if self.security.max_upload_bytes == 0 {
            return Err(AppError::config("MAX_UPLOAD_BYTES must be greater than zero"));
        }
        Ok(())
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Dovana Server Configuration:\n\
             - Bind: {}:{}\n\
             - Database: {}\n\
             - JWT Secret: {}\n\
             - JWT Expiry: {}h\n\
             - CORS Origins: {}\n\
             - Rate Limiting: {}\n\
             - Request Timeout: {}s\n\
             - Max Upload: {} bytes",
            self.host,
            self.http_port,
            self.database_url,
            if self.auth.jwt_secret.is_some() {
                "from environment"
            } else {
                "persisted in database"
            },
            self.auth.jwt_expiry_hours,
            self.security.cors_origins.join(", "),
            if self.security.rate_limit.enabled {
                format!(
                    "Enabled (public {}/min, admin {}/min)",
                    self.security.rate_limit.public_per_minute,
                    self.security.rate_limit.admin_per_minute
                )
            } else {
                "Disabled".to_owned()
            },
            self.security.request_timeout_secs,
            self.security.max_upload_bytes,
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_env<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| AppError::config(format!("Invalid {key} value '{raw}': {e}"))),
        _ => Ok(default),
    }
}

/// Parse comma-separated CORS origins
fn parse_origins(origins_str: &str) -> Vec<String> {
    if origins_str.trim() == "*" {
        vec!["*".to_owned()]
    } else {
        origins_str
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert_eq!(parse_origins("*"), vec!["*"]);
        assert_eq!(
            parse_origins("https://dovana.lt, http://localhost:5173,"),
            vec!["https://dovana.lt", "http://localhost:5173"]
        );
    }

    #[test]
    fn test_database_url_parsing() {
        let file = DatabaseUrl::parse_url("sqlite:./test.db").unwrap();
        assert_eq!(file.to_connection_string(), "sqlite:./test.db");
        assert!(!file.is_memory());

        assert!(DatabaseUrl::parse_url("sqlite::memory:").unwrap().is_memory());

        let bare = DatabaseUrl::parse_url("./some/path.db").unwrap();
        assert_eq!(bare.to_connection_string(), "sqlite:./some/path.db");

        assert!(DatabaseUrl::parse_url("postgres://localhost/db").is_err());
        assert!(DatabaseUrl::parse_url("").is_err());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ServerConfig::for_testing();
        assert!(config.validate().is_ok());

        config.auth.jwt_expiry_hours = 0;
        assert!(config.validate().is_err());

        let mut config = ServerConfig::for_testing();
        config.security.rate_limit.enabled = true;
        config.security.rate_limit.admin_per_minute = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_summary_hides_secret() {
        let config = ServerConfig::for_testing();
        let summary = config.summary();
        assert!(!summary.contains("test-secret"));
        assert!(summary.contains("sqlite::memory:"));
    }
}
