// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::authentication_gate,
    correlation::tag_request,
    models::{LoginRequest, PingResponse, RegisterRequest, RegisterResponse, TokenResponse},
    state::AppState,
};

pub mod auth;
pub mod health;
pub mod ping;

/// Assemble the gateway router.
///
/// Middleware order is explicit and load-bearing: the correlation tagger is
/// the outer layer and runs on every request before the authentication gate,
/// so even gate rejections carry a correlation id on the way out.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/ping", get(ping::ping))
        .with_state(state.clone())
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn_with_state(state, authentication_gate))
        .layer(middleware::from_fn(tag_request))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::register,
        auth::login,
        health::health,
        health::liveness,
        ping::ping
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            RegisterResponse,
            TokenResponse,
            PingResponse,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Auth", description = "Registration and token issuance"),
        (name = "Health", description = "Liveness probes"),
        (name = "Ping", description = "Protected downstream echo")
    )
)]
struct ApiDoc;
