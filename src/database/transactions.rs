// ABOUTME: Transaction management with RAII guards and retry on a busy SQLite database
// ABOUTME: Guards roll back on drop; retries use exponential backoff for lock contention only
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

//! Transaction management with RAII guards and retry patterns
//!
//! Every multi-statement write in the catalog runs as:
//!
//! ```text
//! let pool = &self.pool;
//! retry_transaction(|| async move {
//!     let mut guard = TransactionGuard::new(pool.begin().await?);
//!     sqlx::query("UPDATE ...").execute(guard.executor()?).await?;
//!     guard.commit().await
//! }, TRANSACTION_MAX_RETRIES).await
//! ```
//!
//! Business-rule failures (validation, capacity, boundary, not-found) are
//! returned on the first attempt; only lock contention is retried.

use std::future::Future;
use std::time::Duration;

use sqlx::{Sqlite, Transaction};
use tokio::time::sleep;
use tracing::{debug, error, warn};

use crate::errors::{AppError, AppResult, ErrorCode};

/// Retry a transaction operation if it fails because the database is busy
///
/// Backoff doubles from 20ms: 20ms, 40ms, 80ms, ...
///
/// # Errors
///
/// Returns the last error once `max_retries` attempts have failed, or the
/// first non-retryable error immediately
pub async fn retry_transaction<F, Fut, T>(mut f: F, max_retries: u32) -> AppResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    let mut attempts = 0;
    loop {
        match f().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                attempts += 1;
                if !is_retryable_error(&e) {
                    return Err(e);
                }
                if attempts >= max_retries {
                    error!(
                        attempts = attempts,
                        max_retries = max_retries,
                        error = %e,
                        "Transaction failed after max retries"
                    );
                    return Err(e);
                }

                let backoff_ms = 10 * (1_u64 << attempts);
                warn!(
                    attempt = attempts,
                    max_retries = max_retries,
                    backoff_ms = backoff_ms,
                    error = %e,
                    "Transaction failed with retryable error, retrying after backoff"
                );
                sleep(Duration::from_millis(backoff_ms)).await;
            }
        }
    }
}

/// Only persistence errors caused by locking or timeouts are retried
fn is_retryable_error(error: &AppError) -> bool {
    if error.code != ErrorCode::DatabaseError {
        return false;
    }
    let message = error.message.to_lowercase();
    message.contains("database is locked")
        || message.contains("database table is locked")
        || message.contains("busy")
        || message.contains("timed out")
        || message.contains("timeout")
}

/// RAII guard for `SQLite` transactions ensuring rollback on drop
pub struct TransactionGuard<'c> {
    transaction: Option<Transaction<'c, Sqlite>>,
}

impl<'c> TransactionGuard<'c> {
    /// Wrap a transaction obtained from `pool.begin()`
    #[must_use]
    pub fn new(transaction: Transaction<'c, Sqlite>) -> Self {
        debug!("TransactionGuard created - transaction will auto-rollback if not committed");
        Self {
            transaction: Some(transaction),
        }
    }

    /// Commit the transaction and consume the guard
    ///
    /// # Errors
    ///
    /// Returns an error if the commit fails
    pub async fn commit(mut self) -> AppResult<()> {
        match self.transaction.take() {
            Some(tx) => {
                tx.commit()
                    .await
                    .map_err(|e| AppError::database(format!("Transaction commit failed: {e}")))?;
                debug!("TransactionGuard committed successfully");
                Ok(())
            }
            None => Err(AppError::internal(
                "Transaction already consumed - cannot commit",
            )),
        }
    }

    /// Connection to run statements on inside the transaction
    ///
    /// # Errors
    ///
    /// Returns an error if the guard was already consumed
    pub fn executor(&mut self) -> AppResult<&mut sqlx::SqliteConnection> {
        self.transaction.as_deref_mut().ok_or_else(|| {
            AppError::internal("Transaction already consumed - guard used after commit")
        })
    }
}

impl Drop for TransactionGuard<'_> {
    fn drop(&mut self) {
        if self.transaction.is_some() {
            debug!("TransactionGuard dropped without commit - rolling back");
        }
    }
}
