// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token issuance and verification.
//!
//! Tokens are compact HS256 JWTs signed with the process-wide shared secret.
//! Both operations take the current time as an explicit argument, so they are
//! pure functions of `(claims, secret, clock)` and deterministic under test.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::claims::Claims;
use super::error::AuthError;
use crate::models::User;

/// Issues and verifies the gateway's bearer tokens.
///
/// Constructed once at startup from the configured secret and lifetime;
/// cheap to clone and free of shared mutable state.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime_minutes: i64,
}

impl TokenService {
    pub fn new(secret: &str, lifetime_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            lifetime_minutes,
        }
    }

    /// Issue a signed token for `user`.
    ///
    /// Claims: `{sub: email, role, userId, iat: now, exp: now + lifetime}`.
    /// Two calls with the same user and the same `now` produce the same
    /// token; in practice `now` advances every call.
    pub fn issue(&self, user: &User, now: DateTime<Utc>) -> Result<String, AuthError> {
        let iat = now.timestamp();
        let exp = iat + self.lifetime_minutes * 60;
        let claims = Claims::for_user(user, iat, exp);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("failed to encode token: {e}")))
    }

    /// Verify a token string and return its claims.
    ///
    /// The signature and structure are checked first; any failure there is
    /// `TokenInvalid`. Only a token whose signature verified is then checked
    /// for expiry against the supplied `now` (`exp <= now` is expired), so a
    /// tampered token can never surface as `TokenExpired`.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is evaluated below against the caller's clock, not the
        // system clock baked into the jsonwebtoken validator.
        validation.validate_exp = false;

        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| AuthError::TokenInvalid)?;

        if data.claims.exp <= now.timestamp() {
            return Err(AuthError::TokenExpired);
        }

        Ok(data.claims)
    }
}
