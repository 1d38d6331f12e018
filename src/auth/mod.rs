// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Token lifecycle and request gating for the gateway.
//!
//! ## Auth Flow
//!
//! 1. Client registers via `POST /auth/register` (password stored as an
//!    Argon2 hash)
//! 2. Client logs in via `POST /auth/login` and receives an HS256-signed
//!    bearer token
//! 3. Every later request passes the gate: open paths are forwarded
//!    untouched, everything else needs `Authorization: Bearer <token>`
//! 4. On success the gate injects `X-User-Email` / `X-User-Role` for the
//!    services behind the gateway
//!
//! ## Security
//!
//! - Signing secret and token lifetime are process-wide, loaded once at
//!   startup, never rotated at runtime
//! - Claims are only trusted after the signature verifies
//! - All gate rejections look identical to the caller; kinds are logged

pub mod claims;
pub mod error;
pub mod middleware;
pub mod password;
pub mod roles;
pub mod token;

pub use claims::{AuthenticatedUser, Claims};
pub use error::AuthError;
pub use middleware::{authentication_gate, PathAllowlist, USER_EMAIL_HEADER, USER_ROLE_HEADER};
pub use roles::Role;
pub use token::TokenService;
