use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
    Extension, Json,
};
use serde::Serialize;
use uuid::Uuid;

use service::auth::domain::{LoginInput, RefreshInput, RegisterInput, ResetPasswordInput, TokenPair};
use service::auth::tokens::TokenClaims;
use service::auth::AuthService;

use crate::errors::ApiError;

/// Shared handler state; the service owns the stores behind trait objects
#[derive(Clone)]
pub struct ServerState {
    pub auth: Arc<AuthService>,
}

#[derive(Serialize)]
pub struct RegisterOutput {
    pub message: &'static str,
    pub user_id: Uuid,
}

#[derive(Serialize)]
pub struct MessageOutput {
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct MeOutput {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
}

#[utoipa::path(post, path = "/auth/register", tag = "auth", request_body = crate::openapi::RegisterRequest,
    responses((status = 201, description = "Registered"), (status = 400, description = "Duplicate email or username, weak password or invalid fields")))]
pub async fn register(
    State(state): State<ServerState>,
    Json(input): Json<RegisterInput>,
) -> Result<(StatusCode, Json<RegisterOutput>), ApiError> {
    let user = state.auth.register(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterOutput { message: "User registered successfully", user_id: user.id }),
    ))
}

#[utoipa::path(post, path = "/auth/login", tag = "auth", request_body = crate::openapi::LoginRequest,
    responses((status = 200, description = "Token pair issued"), (status = 400, description = "Missing fields"), (status = 401, description = "Invalid password"), (status = 404, description = "User not found")))]
pub async fn login(
    State(state): State<ServerState>,
    Json(input): Json<LoginInput>,
) -> Result<Json<TokenPair>, ApiError> {
    let pair = state.auth.login(input).await?;
    Ok(Json(pair))
}

#[utoipa::path(post, path = "/auth/reset-password", tag = "auth", request_body = crate::openapi::ResetPasswordRequest,
    responses((status = 200, description = "Password reset"), (status = 400, description = "Missing fields or mismatched confirmation"), (status = 404, description = "User not found")))]
pub async fn reset_password(
    State(state): State<ServerState>,
    Json(input): Json<ResetPasswordInput>,
) -> Result<Json<MessageOutput>, ApiError> {
    state.auth.reset_password(input).await?;
    Ok(Json(MessageOutput { message: "Password reset successful!" }))
}

#[utoipa::path(post, path = "/auth/refresh", tag = "auth", request_body = crate::openapi::RefreshRequest,
    responses((status = 200, description = "Token pair rotated"), (status = 400, description = "Missing token"), (status = 401, description = "Invalid, expired or already rotated token")))]
pub async fn refresh(
    State(state): State<ServerState>,
    Json(input): Json<RefreshInput>,
) -> Result<Json<TokenPair>, ApiError> {
    let pair = state.auth.refresh(&input.refresh).await?;
    Ok(Json(pair))
}

#[utoipa::path(get, path = "/auth/me", tag = "auth",
    responses((status = 200, description = "Identity of the bearer"), (status = 400, description = "Missing token"), (status = 401, description = "Invalid token")))]
pub async fn me(Extension(claims): Extension<TokenClaims>) -> Json<MeOutput> {
    Json(MeOutput {
        user_id: claims.user_id,
        username: claims.username,
        email: claims.email,
    })
}

/// Access token from the `auth_token` cookie, for clients that stash it there
fn cookie_token(headers: &axum::http::HeaderMap) -> Option<String> {
    let raw = headers
        .get(axum::http::header::COOKIE)
        .and_then(|v| v.to_str().ok())?;
    raw.split(';')
        .filter_map(|part| part.trim().strip_prefix("auth_token="))
        .find(|v| !v.is_empty())
        .map(str::to_string)
}

/// Route-layer middleware: validate `Authorization: Bearer <access token>`,
/// falling back to an `auth_token` cookie, and inject the verified claims
/// into request extensions. Missing credentials return 400, invalid or
/// expired ones 401.
pub async fn require_bearer_token(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let path = req.uri().path().to_string();

    let token = match req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        Some(h) => match h.strip_prefix("Bearer ") {
            Some(t) => t.to_string(),
            None => {
                tracing::warn!(path = %path, "invalid Authorization format (expect Bearer)");
                return Err(StatusCode::UNAUTHORIZED);
            }
        },
        None => match cookie_token(req.headers()) {
            Some(t) => t,
            None => {
                tracing::warn!(path = %path, "missing Authorization header and auth_token cookie");
                return Err(StatusCode::BAD_REQUEST);
            }
        },
    };

    match state.auth.verify_access(&token) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::error!(path = %path, code = e.code(), error = %e, "token validation failed");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}
