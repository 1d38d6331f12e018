// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The authentication gate.
//!
//! Axum middleware that decides pass/reject for every request behind the
//! gateway. Terminal states, in precedence order:
//!
//! 1. Open path: forwarded untouched, no token parsing attempted
//! 2. Missing or malformed `Authorization` header: 401
//! 3. Expired token: 401
//! 4. Invalid token (malformed or bad signature): 401
//! 5. Authenticated: identity headers injected, forwarded
//!
//! All rejections share one generic response body; the distinct kind is
//! logged. Runs after the correlation tagger, so rejection responses still
//! carry the correlation id.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use super::claims::AuthenticatedUser;
use super::error::AuthError;
use crate::state::AppState;

pub const USER_EMAIL_HEADER: HeaderName = HeaderName::from_static("x-user-email");
pub const USER_ROLE_HEADER: HeaderName = HeaderName::from_static("x-user-role");

/// Ordered list of path prefixes exempt from token validation.
#[derive(Debug, Clone, Default)]
pub struct PathAllowlist {
    prefixes: Vec<String>,
}

impl PathAllowlist {
    pub fn new(prefixes: Vec<String>) -> Self {
        Self { prefixes }
    }

    /// Whether `path` matches any configured prefix.
    pub fn matches(&self, path: &str) -> bool {
        self.prefixes.iter().any(|prefix| path.starts_with(prefix))
    }
}

/// Authentication gate middleware.
pub async fn authentication_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    // The allowlist check comes strictly first: open paths never touch the
    // token service, with or without an Authorization header.
    if state.open_paths.matches(&path) {
        return next.run(request).await;
    }

    let token = match bearer_token(request.headers()) {
        Ok(token) => token,
        Err(e) => return reject(e, &path),
    };

    let claims = match state.tokens.verify(&token, Utc::now()) {
        Ok(claims) => claims,
        Err(e) => return reject(e, &path),
    };

    let user = AuthenticatedUser::from_claims(claims);
    if let Err(e) = inject_identity(request.headers_mut(), &user) {
        return reject(e, &path);
    }

    tracing::info!(
        email = %user.email,
        role = %user.role,
        path = %path,
        "token accepted"
    );

    request.extensions_mut().insert(user);
    next.run(request).await
}

/// Extract the bearer token from the `Authorization` header.
fn bearer_token(headers: &HeaderMap) -> Result<String, AuthError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?;

    let value = header.to_str().map_err(|_| AuthError::InvalidAuthHeader)?;

    value
        .strip_prefix("Bearer ")
        .map(ToString::to_string)
        .ok_or(AuthError::InvalidAuthHeader)
}

/// Replace any client-supplied identity headers with values derived from the
/// verified claims. Inbound `X-User-Email`/`X-User-Role` are never trusted.
fn inject_identity(headers: &mut HeaderMap, user: &AuthenticatedUser) -> Result<(), AuthError> {
    let email = HeaderValue::from_str(&user.email)
        .map_err(|_| AuthError::Internal("email is not a valid header value".to_string()))?;
    let role = HeaderValue::from_str(&user.role.to_string())
        .map_err(|_| AuthError::Internal("role is not a valid header value".to_string()))?;

    headers.insert(USER_EMAIL_HEADER, email);
    headers.insert(USER_ROLE_HEADER, role);
    Ok(())
}

fn reject(error: AuthError, path: &str) -> Response {
    tracing::warn!(kind = error.kind(), path = %path, "request rejected at gate");
    error.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        middleware,
        routing::get,
        Json, Router,
    };
    use chrono::Duration;
    use serde_json::json;
    use tower::ServiceExt;

    /// Downstream probe returning the identity headers it received.
    async fn downstream(request: Request<Body>) -> Json<serde_json::Value> {
        let header = |name: &HeaderName| {
            request
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("absent")
                .to_string()
        };
        Json(json!({
            "email": header(&USER_EMAIL_HEADER),
            "role": header(&USER_ROLE_HEADER),
        }))
    }

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/protected", get(downstream))
            .route("/health", get(|| async { "ok" }))
            .layer(middleware::from_fn_with_state(state, authentication_gate))
    }

    fn token_for(state: &AppState, email: &str) -> String {
        let user = state
            .store
            .save(crate::store::NewUser {
                email: email.to_string(),
                password_hash: "unused".to_string(),
                role: crate::auth::Role::Customer,
            })
            .unwrap();
        state.tokens.issue(&user, Utc::now()).unwrap()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn open_path_passes_without_authorization() {
        let response = app(AppState::for_tests())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn open_path_ignores_a_garbage_authorization_header() {
        // Open paths must not attempt any token parsing.
        let response = app(AppState::for_tests())
            .oneshot(
                Request::get("/health")
                    .header("Authorization", "Bearer not-even-a-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_and_malformed_credentials_get_the_same_401() {
        let state = AppState::for_tests();

        let missing = app(state.clone())
            .oneshot(Request::get("/protected").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

        let malformed = app(state)
            .oneshot(
                Request::get("/protected")
                    .header("Authorization", "Basic dXNlcjpwdw==")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(malformed.status(), StatusCode::UNAUTHORIZED);

        assert_eq!(json_body(missing).await, json_body(malformed).await);
    }

    #[tokio::test]
    async fn valid_token_forwards_with_identity_headers() {
        let state = AppState::for_tests();
        let token = token_for(&state, "a@x.com");

        let response = app(state)
            .oneshot(
                Request::get("/protected")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["email"], "a@x.com");
        assert_eq!(body["role"], "CUSTOMER");
    }

    #[tokio::test]
    async fn client_supplied_identity_headers_are_overwritten() {
        let state = AppState::for_tests();
        let token = token_for(&state, "a@x.com");

        let response = app(state)
            .oneshot(
                Request::get("/protected")
                    .header("Authorization", format!("Bearer {token}"))
                    .header("X-User-Email", "spoof@evil.com")
                    .header("X-User-Role", "ADMIN")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(body["email"], "a@x.com");
        assert_eq!(body["role"], "CUSTOMER");
    }

    #[tokio::test]
    async fn spoofed_identity_without_a_token_is_rejected() {
        let response = app(AppState::for_tests())
            .oneshot(
                Request::get("/protected")
                    .header("X-User-Email", "spoof@evil.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn expired_token_is_rejected_with_the_generic_body() {
        let state = AppState::for_tests();
        let user = state
            .store
            .save(crate::store::NewUser {
                email: "a@x.com".to_string(),
                password_hash: "unused".to_string(),
                role: crate::auth::Role::Customer,
            })
            .unwrap();
        // Issued two hours ago with a 30-minute lifetime.
        let stale = state
            .tokens
            .issue(&user, Utc::now() - Duration::hours(2))
            .unwrap();

        let response = app(state)
            .oneshot(
                Request::get("/protected")
                    .header("Authorization", format!("Bearer {stale}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await, json!({"error": "Unauthorized"}));
    }

    #[test]
    fn allowlist_matches_by_prefix_only() {
        let allowlist = PathAllowlist::new(vec!["/auth/".to_string(), "/health".to_string()]);
        assert!(allowlist.matches("/auth/login"));
        assert!(allowlist.matches("/health"));
        assert!(allowlist.matches("/health/live"));
        assert!(!allowlist.matches("/orders"));
        assert!(!allowlist.matches("/api/auth/login"));
    }
}
