// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! API data model: the user record and request/response bodies.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::Role;

/// A registered user.
///
/// The id is store-assigned; the email is unique (exact, case-sensitive
/// match). Only the irreversible password hash is held, never the plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip)]
    pub password_hash: String,
    pub role: Role,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    /// Optional role name, parsed case-insensitively ("admin" → ADMIN).
    /// Defaults to CUSTOMER when omitted.
    #[serde(default)]
    pub role: Option<String>,
}

/// Body of `POST /auth/login`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful registration response.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
    pub email: String,
    pub role: Role,
}

/// Successful login response: the bearer token plus a plain-text summary
/// of the identity it encodes.
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
    pub email: String,
    pub role: Role,
}

/// Response of the protected `GET /ping` probe.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PingResponse {
    pub service: String,
    pub status: String,
    /// Correlation id as received from the gateway chain.
    pub correlation_id: String,
    /// Identity injected by the gate.
    pub email: String,
    pub role: String,
}
