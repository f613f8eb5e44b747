// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Limits, defaults, environment variable names and service identifiers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

//! Constants grouped by domain.

/// Service identifiers used in logs and tokens
pub mod service_names {
    /// Name of the HTTP service
    pub const DOVANA_SERVER: &str = "dovana-server";
    /// JWT audience
    pub const TOKEN_AUDIENCE: &str = "dovana";
}

/// Catalog business limits
pub mod limits {
    /// Maximum number of featured items shown on the landing page
    pub const MAX_FEATURED_ITEMS: usize = 5;
    /// Maximum length of names, websites and short URLs
    pub const MAX_NAME_LENGTH: usize = 255;
    /// Maximum length of a stored client IP address (IPv6 text form)
    pub const MAX_IP_LENGTH: usize = 45;
    /// Window in which an identical redirect is treated as a duplicate
    pub const REDIRECT_DEDUP_WINDOW_SECS: i64 = 5;
    /// Retries for featured-item transactions hitting a busy database
    pub const TRANSACTION_MAX_RETRIES: u32 = 3;
    /// Default XML upload size limit
    pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;
}

/// Default configuration values
pub mod defaults {
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 8081;
    /// Default bind host
    pub const HOST: &str = "127.0.0.1";
    /// Default database location
    pub const DATABASE_URL: &str = "sqlite:./data/dovana.db";
    /// Default JWT lifetime in hours
    pub const JWT_EXPIRY_HOURS: i64 = 24;
    /// Default public rate limit (requests per minute)
    pub const PUBLIC_REQUESTS_PER_MINUTE: u32 = 60;
    /// Default admin rate limit (requests per minute)
    pub const ADMIN_REQUESTS_PER_MINUTE: u32 = 100;
    /// Default request timeout
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
}

/// Environment variable names
pub mod env_vars {
    /// HTTP port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Bind host
    pub const HOST: &str = "HOST";
    /// Database URL
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// JWT signing secret
    pub const JWT_SECRET: &str = "JWT_SECRET";
    /// JWT lifetime
    pub const JWT_EXPIRY_HOURS: &str = "JWT_EXPIRY_HOURS";
    /// Comma separated CORS origins
    pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
    /// Toggle for rate limiting
    pub const RATE_LIMIT_ENABLED: &str = "RATE_LIMIT_ENABLED";
    /// Public rate limit
    pub const RATE_LIMIT_PUBLIC_PER_MINUTE: &str = "RATE_LIMIT_PUBLIC_PER_MINUTE";
    /// Admin rate limit
    pub const RATE_LIMIT_ADMIN_PER_MINUTE: &str = "RATE_LIMIT_ADMIN_PER_MINUTE";
    /// Request timeout
    pub const REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";
    /// Upload size limit
    pub const MAX_UPLOAD_BYTES: &str = "MAX_UPLOAD_BYTES";
}

/// Keys in the `system_settings` table
pub mod system_settings {
    /// Generated JWT secret when `JWT_SECRET` is not set
    pub const JWT_SECRET: &str = "jwt_secret";
}

/// Seed data for the occasion attribute group
pub mod seeds {
    /// Name of the occasion attribute group
    pub const OCCASION_GROUP: &str = "Proga";
    /// Occasions created under [`OCCASION_GROUP`]
    pub const OCCASIONS: [&str; 5] = [
        "Kalėdos",
        "Gimtadienis",
        "Tėvo diena",
        "Mamos diena",
        "Santuoka",
    ];
}
