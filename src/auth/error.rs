// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.
//!
//! Every gate rejection maps to the same external response: `401` with a
//! generic body. The specific failure kind (missing header, expired token,
//! bad signature) is only visible in logs, so a caller probing the gateway
//! cannot distinguish why a credential was refused.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Authentication error type.
#[derive(Debug, Error, PartialEq)]
pub enum AuthError {
    /// No authorization header present
    #[error("Authorization header is required")]
    MissingAuthHeader,
    /// Authorization header does not carry a `Bearer <token>` credential
    #[error("Invalid authorization header format (expected 'Bearer <token>')")]
    InvalidAuthHeader,
    /// Token is malformed or its signature does not verify
    #[error("Token is invalid")]
    TokenInvalid,
    /// Token has expired
    #[error("Token has expired")]
    TokenExpired,
    /// Internal error (token encoding, header construction)
    #[error("Internal authentication error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
}

impl AuthError {
    /// Stable kind label used for logging and metrics, never sent to callers.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::MissingAuthHeader => "missing_auth_header",
            AuthError::InvalidAuthHeader => "invalid_auth_header",
            AuthError::TokenInvalid => "token_invalid",
            AuthError::TokenExpired => "token_expired",
            AuthError::Internal(_) => "internal_error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingAuthHeader
            | AuthError::InvalidAuthHeader
            | AuthError::TokenInvalid
            | AuthError::TokenExpired => StatusCode::UNAUTHORIZED,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // Uniform external message for all 401s: expired, malformed and
        // missing credentials must be indistinguishable to the caller.
        let message = match status {
            StatusCode::UNAUTHORIZED => "Unauthorized",
            _ => "Internal server error",
        };
        let body = Json(AuthErrorBody {
            error: message.to_string(),
        });
        (status, body).into_response()
    }
}
