//! Admin login, logout, and session token extraction

use super::ApiError;
use crate::AppState;
use axum::async_trait;
use axum::extract::{FromRequestParts, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

/// Header carrying the session token (alternative to `Authorization: Bearer`)
pub const TOKEN_HEADER: &str = "x-admin-token";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub name: String,
}

/// POST /api/admin/login
///
/// Checks the submitted credentials against the two configured strings and
/// issues a session token with the configured expiry.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if req.username != state.config.admin_username || req.password != state.config.admin_password {
        return Err(ApiError::Unauthorized(
            "Invalid username or password".to_string(),
        ));
    }

    let session = state.sessions.issue();
    info!("Admin session issued for {}", req.username);

    Ok(Json(LoginResponse {
        token: session.token,
        expires_at: session.expires_at,
        name: "관리자".to_string(),
    }))
}

/// POST /api/admin/logout
///
/// Revokes the presented token. Requires a valid session, so a stale token
/// gets the same 401 as everywhere else.
pub async fn logout(
    State(state): State<AppState>,
    admin: AdminSession,
) -> Json<Value> {
    state.sessions.revoke(&admin.token);
    info!("Admin session revoked");
    Json(json!({ "success": true }))
}

/// Extractor proving the request carries a live admin session
///
/// Accepts the token via `x-admin-token` or `Authorization: Bearer`.
/// Mutation and upload handlers take this as an argument; reads never do.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub token: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| ApiError::Unauthorized("Admin session required".to_string()))?;

        if !state.sessions.validate(&token) {
            return Err(ApiError::Unauthorized(
                "Session expired or unknown".to_string(),
            ));
        }

        Ok(AdminSession { token })
    }
}

fn bearer_token(parts: &Parts) -> Option<String> {
    if let Some(value) = parts.headers.get(TOKEN_HEADER) {
        return value.to_str().ok().map(str::to_string);
    }
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}
