// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Correlation-id tagging middleware.
//!
//! Runs before the authentication gate on every request. A non-blank inbound
//! `X-Correlation-Id` is reused verbatim; otherwise a fresh UUID is
//! generated. The same id is written onto the forwarded request and onto the
//! response, including gate rejections, which pass back through this layer.

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

pub const CORRELATION_ID_HEADER: HeaderName = HeaderName::from_static("x-correlation-id");

/// Correlation id for the current request, available from request extensions.
#[derive(Debug, Clone)]
pub struct CorrelationId(pub String);

pub async fn tag_request(mut request: Request, next: Next) -> Response {
    // Reuse an inbound id when present and non-blank, otherwise mint one.
    let inbound = request
        .headers()
        .get(&CORRELATION_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .map(ToString::to_string);
    let correlation_id = inbound.unwrap_or_else(|| Uuid::new_v4().to_string());

    tracing::info!(
        correlation_id = %correlation_id,
        method = %request.method(),
        path = %request.uri().path(),
        "inbound request"
    );

    let header_value = HeaderValue::from_str(&correlation_id)
        .unwrap_or_else(|_| HeaderValue::from_static("invalid-correlation-id"));

    request
        .headers_mut()
        .insert(CORRELATION_ID_HEADER, header_value.clone());
    request
        .extensions_mut()
        .insert(CorrelationId(correlation_id));

    let mut response = next.run(request).await;

    response
        .headers_mut()
        .insert(CORRELATION_ID_HEADER, header_value);

    response
}
