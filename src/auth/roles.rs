// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User roles for authorization.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User roles carried in tokens and identity headers.
///
/// The set is closed: every boundary that accepts a role string must parse
/// it against these variants and reject anything else. No other value is
/// ever stored or embedded in a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Full administrative access
    Admin,
    /// Normal customer account
    Customer,
}

impl Role {
    /// Parse a role from a string (case-insensitive).
    ///
    /// Returns `None` for anything outside the closed set; callers must
    /// surface that as a validation failure, never fall back silently.
    pub fn from_str(s: &str) -> Option<Role> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "customer" => Some(Role::Customer),
            _ => None,
        }
    }
}

impl Default for Role {
    /// Default role is Customer (least privilege).
    fn default() -> Self {
        Role::Customer
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "ADMIN"),
            Role::Customer => write!(f, "CUSTOMER"),
        }
    }
}
