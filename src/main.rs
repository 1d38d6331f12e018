// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::net::SocketAddr;
use std::sync::Arc;

use auth_gateway::api::router;
use auth_gateway::auth::{PathAllowlist, TokenService};
use auth_gateway::config::Config;
use auth_gateway::state::AppState;
use auth_gateway::store::InMemoryStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();

    // Missing secret or lifetime must prevent the service from accepting
    // traffic at all.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("fatal: {e}");
            std::process::exit(1);
        }
    };

    let store = Arc::new(InMemoryStore::new());
    let tokens = TokenService::new(&config.jwt_secret, config.token_lifetime_minutes);
    let open_paths = PathAllowlist::new(config.open_paths.clone());

    let state = AppState::new(store, tokens, open_paths);
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Failed to parse bind address");

    tracing::info!("Auth gateway listening on http://{addr} (docs at /docs)");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if std::env::var("LOG_FORMAT").is_ok_and(|v| v == "json") {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutdown signal received");
    }
}
