// ABOUTME: Axum IntoResponse integration for AppError
// ABOUTME: Serializes errors into the JSON error envelope with the mapped status code
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;

use super::{AppError, ErrorCode, ErrorResponse};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Persistence failures are logged with their cause but never leaked to clients
        let body = if matches!(self.code, ErrorCode::DatabaseError | ErrorCode::InternalError) {
            tracing::error!(code = ?self.code, error = %self.message, "Request failed");
            ErrorResponse::from(&AppError::new(self.code, self.code.description()))
        } else {
            ErrorResponse::from(&self)
        };

        (status, Json(body)).into_response()
    }
}
