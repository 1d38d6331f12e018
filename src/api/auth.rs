// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Registration and login endpoints.
//!
//! Both live under `/auth/`, an open path: clients call them directly to
//! obtain the token used on every protected request afterwards.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;

use crate::{
    auth::{password, Role},
    error::ApiError,
    models::{LoginRequest, RegisterRequest, RegisterResponse, TokenResponse},
    state::AppState,
    store::{NewUser, StoreError},
};

#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    tag = "Auth",
    responses(
        (status = 201, description = "User created", body = RegisterResponse),
        (status = 400, description = "Invalid role"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let role = match request.role.as_deref() {
        None => Role::default(),
        Some(raw) => Role::from_str(raw)
            .ok_or_else(|| ApiError::bad_request("Invalid role. Use ADMIN or CUSTOMER"))?,
    };

    // Fast-fail on a known duplicate; the save below still has to handle the
    // conflict, since this check and the write are not atomic together.
    if state.store.exists_by_email(&request.email) {
        return Err(ApiError::conflict("Email is already registered"));
    }

    let password_hash = password::hash(&request.password)
        .map_err(|e| ApiError::internal(format!("failed to hash password: {e}")))?;

    let user = state
        .store
        .save(NewUser {
            email: request.email,
            password_hash,
            role,
        })
        .map_err(|e| match e {
            StoreError::EmailTaken(_) => ApiError::conflict("Email is already registered"),
        })?;

    tracing::info!(email = %user.email, role = %user.role, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User created successfully".to_string(),
            email: user.email,
            role: user.role,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = state.store.find_by_email(&request.email);

    // Unknown email and wrong password collapse into one outcome, so the
    // endpoint cannot be used to enumerate accounts.
    let verified = user
        .as_ref()
        .map(|u| password::verify(&request.password, &u.password_hash))
        .unwrap_or(false);

    let Some(user) = user.filter(|_| verified) else {
        tracing::warn!(email = %request.email, "login failed");
        return Err(ApiError::unauthorized("Invalid credentials"));
    };

    let token = state
        .tokens
        .issue(&user, Utc::now())
        .map_err(|e| ApiError::internal(format!("failed to issue token: {e}")))?;

    tracing::info!(email = %user.email, role = %user.role, "login succeeded");

    Ok(Json(TokenResponse {
        token,
        email: user.email,
        role: user.role,
    }))
}
