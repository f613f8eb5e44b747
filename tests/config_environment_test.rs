// ABOUTME: Tests for environment configuration loading and secret persistence
// ABOUTME: Environment-mutating tests run serially; the secret test uses a temporary database file
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::env;

use dovana::{
    config::{DatabaseUrl, ServerConfig},
    constants::{defaults, env_vars},
    database::Database,
    errors::ErrorCode,
};
use serial_test::serial;

const ALL_VARS: [&str; 11] = [
    env_vars::HTTP_PORT,
    env_vars::HOST,
    env_vars::DATABASE_URL,
    env_vars::JWT_SECRET,
    env_vars::JWT_EXPIRY_HOURS,
    env_vars::CORS_ALLOWED_ORIGINS,
    env_vars::RATE_LIMIT_ENABLED,
    env_vars::RATE_LIMIT_PUBLIC_PER_MINUTE,
    env_vars::RATE_LIMIT_ADMIN_PER_MINUTE,
    env_vars::REQUEST_TIMEOUT_SECS,
    env_vars::MAX_UPLOAD_BYTES,
];

fn clear_env() {
    for var in ALL_VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();
    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.http_port, defaults::HTTP_PORT);
    assert_eq!(config.host, defaults::HOST);
    assert!(config.auth.jwt_secret.is_none());
    assert_eq!(config.security.cors_origins, vec!["*".to_owned()]);
    assert!(config.security.rate_limit.enabled);
    assert_eq!(
        config.security.rate_limit.public_per_minute,
        defaults::PUBLIC_REQUESTS_PER_MINUTE
    );
    assert_eq!(
        config.database_url,
        DatabaseUrl::parse_url(defaults::DATABASE_URL).unwrap()
    );
}

#[test]
#[serial]
fn test_environment_overrides() {
    clear_env();
    env::set_var(env_vars::HTTP_PORT, "9090");
    env::set_var(env_vars::DATABASE_URL, "sqlite::memory:");
    env::set_var(env_vars::JWT_SECRET, "from-env");
    env::set_var(
        env_vars::CORS_ALLOWED_ORIGINS,
        "https://dovana.example, https://admin.dovana.example",
    );
    env::set_var(env_vars::RATE_LIMIT_ENABLED, "false");
    env::set_var(env_vars::MAX_UPLOAD_BYTES, "1024");

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.http_port, 9090);
    assert!(config.database_url.is_memory());
    assert_eq!(config.auth.jwt_secret.as_deref(), Some("from-env"));
    assert_eq!(config.security.cors_origins.len(), 2);
    assert!(!config.security.rate_limit.enabled);
    assert_eq!(config.security.max_upload_bytes, 1024);
    assert!(!config.summary().contains("from-env"));
}

#[test]
#[serial]
fn test_invalid_values_are_config_errors() {
    clear_env();
    env::set_var(env_vars::HTTP_PORT, "eighty");
    let err = ServerConfig::from_env().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigError);

    clear_env();
    env::set_var(env_vars::JWT_EXPIRY_HOURS, "0");
    let err = ServerConfig::from_env().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigError);

    clear_env();
    env::set_var(env_vars::DATABASE_URL, "postgres://localhost/dovana");
    assert!(ServerConfig::from_env().is_err());
    clear_env();
}

#[tokio::test]
async fn test_generated_secret_survives_reopen() {
    common::init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let url = DatabaseUrl::SQLite {
        path: dir.path().join("dovana.db"),
    };

    let first = {
        let database = Database::new(&url).await.unwrap();
        database.get_or_create_jwt_secret().await.unwrap()
    };
    assert_eq!(first.len(), 128);

    let database = Database::new(&url).await.unwrap();
    let second = database.get_or_create_jwt_secret().await.unwrap();
    assert_eq!(first, second);
}
