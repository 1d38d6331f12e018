// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Protected echo endpoint.
//!
//! Stands in for a service behind the gateway: it reads the correlation and
//! identity headers exactly as a downstream service would, which makes it a
//! convenient end-to-end probe for the gating chain.

use axum::{http::HeaderMap, Json};

use crate::auth::{USER_EMAIL_HEADER, USER_ROLE_HEADER};
use crate::correlation::CORRELATION_ID_HEADER;
use crate::models::PingResponse;

fn header_or_na(headers: &HeaderMap, name: &axum::http::HeaderName) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("N/A")
        .to_string()
}

#[utoipa::path(
    get,
    path = "/ping",
    tag = "Ping",
    responses(
        (status = 200, description = "Echo of the forwarded headers", body = PingResponse),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn ping(headers: HeaderMap) -> Json<PingResponse> {
    let correlation_id = header_or_na(&headers, &CORRELATION_ID_HEADER);

    tracing::info!(correlation_id = %correlation_id, "ping");

    Json(PingResponse {
        service: "auth-gateway".to_string(),
        status: "ok".to_string(),
        correlation_id,
        email: header_or_na(&headers, &USER_EMAIL_HEADER),
        role: header_or_na(&headers, &USER_ROLE_HEADER),
    })
}
