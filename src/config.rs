// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup and treated
//! as immutable for the lifetime of the process. Missing or invalid required
//! values are fatal: the service must not accept traffic without a signing
//! secret or a token lifetime.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `JWT_SECRET` | Shared symmetric signing secret | Required |
//! | `JWT_EXPIRATION_MINUTES` | Token lifetime in minutes | Required |
//! | `OPEN_PATHS` | Comma-separated path prefixes exempt from auth | `/auth/,/health,/docs,/api-doc` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;

use thiserror::Error;

/// Environment variable name for the shared signing secret.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Environment variable name for the token lifetime in minutes.
pub const JWT_EXPIRATION_ENV: &str = "JWT_EXPIRATION_MINUTES";

/// Environment variable name for the open-path prefix list.
pub const OPEN_PATHS_ENV: &str = "OPEN_PATHS";

/// Path prefixes that bypass the authentication gate when `OPEN_PATHS` is
/// not set: the login/register surface, health checks and the API docs.
pub const DEFAULT_OPEN_PATHS: &[&str] = &["/auth/", "/health", "/docs", "/api-doc"];

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),
    #[error("environment variable {0} is invalid: {1}")]
    Invalid(&'static str, String),
}

/// Process-wide configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Shared symmetric secret used to sign and verify tokens.
    pub jwt_secret: String,
    /// Token lifetime in minutes; `exp = iat + lifetime`.
    pub token_lifetime_minutes: i64,
    /// Ordered list of path prefixes exempt from token validation.
    pub open_paths: Vec<String>,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// `from_env` delegates here; tests supply a map instead of mutating the
    /// process environment.
    fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = get(JWT_SECRET_ENV)
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing(JWT_SECRET_ENV))?;

        let raw_lifetime =
            get(JWT_EXPIRATION_ENV).ok_or(ConfigError::Missing(JWT_EXPIRATION_ENV))?;
        let token_lifetime_minutes: i64 = raw_lifetime.trim().parse().map_err(|_| {
            ConfigError::Invalid(JWT_EXPIRATION_ENV, format!("not an integer: {raw_lifetime}"))
        })?;
        if token_lifetime_minutes <= 0 {
            return Err(ConfigError::Invalid(
                JWT_EXPIRATION_ENV,
                format!("must be positive: {token_lifetime_minutes}"),
            ));
        }

        let open_paths = match get(OPEN_PATHS_ENV) {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(ToString::to_string)
                .collect(),
            None => DEFAULT_OPEN_PATHS.iter().map(ToString::to_string).collect(),
        };

        let host = get("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", format!("not a port: {raw}")))?,
            None => 8080,
        };

        Ok(Self {
            host,
            port,
            jwt_secret,
            token_lifetime_minutes,
            open_paths,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |name| map.get(name).map(ToString::to_string)
    }

    #[test]
    fn minimal_valid_configuration() {
        let config = Config::from_lookup(lookup(&[
            (JWT_SECRET_ENV, "s3cret"),
            (JWT_EXPIRATION_ENV, "30"),
        ]))
        .unwrap();

        assert_eq!(config.jwt_secret, "s3cret");
        assert_eq!(config.token_lifetime_minutes, 30);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.open_paths,
            vec!["/auth/", "/health", "/docs", "/api-doc"]
        );
    }

    #[test]
    fn missing_secret_is_fatal() {
        let err = Config::from_lookup(lookup(&[(JWT_EXPIRATION_ENV, "30")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing(JWT_SECRET_ENV));
    }

    #[test]
    fn blank_secret_counts_as_missing() {
        let err = Config::from_lookup(lookup(&[
            (JWT_SECRET_ENV, "   "),
            (JWT_EXPIRATION_ENV, "30"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing(JWT_SECRET_ENV));
    }

    #[test]
    fn missing_or_invalid_lifetime_is_fatal() {
        let err = Config::from_lookup(lookup(&[(JWT_SECRET_ENV, "s")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing(JWT_EXPIRATION_ENV));

        let err = Config::from_lookup(lookup(&[
            (JWT_SECRET_ENV, "s"),
            (JWT_EXPIRATION_ENV, "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(JWT_EXPIRATION_ENV, _)));

        let err = Config::from_lookup(lookup(&[
            (JWT_SECRET_ENV, "s"),
            (JWT_EXPIRATION_ENV, "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(JWT_EXPIRATION_ENV, _)));
    }

    #[test]
    fn open_paths_override_is_parsed_and_trimmed() {
        let config = Config::from_lookup(lookup(&[
            (JWT_SECRET_ENV, "s"),
            (JWT_EXPIRATION_ENV, "30"),
            (OPEN_PATHS_ENV, "/auth/, /status ,,/metrics"),
        ]))
        .unwrap();

        assert_eq!(config.open_paths, vec!["/auth/", "/status", "/metrics"]);
    }
}
