use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use chrono::Utc;

use super::AccessTokenData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Handler for `GET /auth/refresh_token`: redeem a refresh token.
///
/// Expects `Authorization: Bearer <refresh_token>`. An access-kind
/// token is rejected even when its signature is valid.
pub async fn refresh_token(
    State(state): State<AppState>,
    req: Request,
) -> Result<ApiSuccess<AccessTokenData>, ApiError> {
    let token = extract_bearer_token(&req)?;

    let refreshed = state.session_service.refresh(token, Utc::now()).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        AccessTokenData {
            access_token: refreshed.access_token,
            token_type: refreshed.token_type,
        },
    ))
}

fn extract_bearer_token(req: &Request) -> Result<&str, ApiError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

    if !auth_str.starts_with("Bearer ") {
        return Err(ApiError::Unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
        ));
    }

    Ok(auth_str.trim_start_matches("Bearer "))
}
