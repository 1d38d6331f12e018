// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token claims and authenticated user representation.

use serde::{Deserialize, Serialize};

use super::roles::Role;
use crate::models::User;

/// Claims carried inside a gateway-issued access token.
///
/// The `role` field is the typed [`Role`] enum, so a token embedding any
/// string outside the closed set fails deserialization (and therefore
/// verification) instead of smuggling an unknown role downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's email
    pub sub: String,

    /// User's role
    pub role: Role,

    /// Store-assigned user id
    #[serde(rename = "userId")]
    pub user_id: i64,

    /// Issued-at (seconds since epoch)
    pub iat: i64,

    /// Expiry (seconds since epoch)
    pub exp: i64,
}

/// Authenticated identity attached to a request after the gate accepts it.
///
/// Inserted into request extensions by the authentication middleware and
/// mirrored into the `X-User-Email` / `X-User-Role` headers for the
/// services behind the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub email: String,
    pub role: Role,
    pub user_id: i64,
}

impl AuthenticatedUser {
    /// Create from verified claims.
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            email: claims.sub,
            role: claims.role,
            user_id: claims.user_id,
        }
    }
}

impl Claims {
    /// Build the claims for a freshly issued token.
    pub fn for_user(user: &User, issued_at: i64, expires_at: i64) -> Self {
        Self {
            sub: user.email.clone(),
            role: user.role,
            user_id: user.id,
            iat: issued_at,
            exp: expires_at,
        }
    }
}
