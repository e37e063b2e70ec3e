use auth::Platform;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    username: String,
    password: String,
    #[serde(default)]
    platform: Platform,
}

/// Handler for `POST /auth/login`: verify a credential and issue a
/// token pair.
///
/// For `platform=web` the refresh token is delivered as an HttpOnly
/// cookie and omitted from the body; for `platform=mobile` (the
/// default) it stays in the body.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<Response, ApiError> {
    let pair = state
        .session_service
        .authenticate(&body.username, &body.password, Utc::now())
        .await?;

    let (payload, cookie) = state.delivery_policy.apply(body.platform, pair);

    let mut response = ApiSuccess::new(StatusCode::OK, payload).into_response();

    if let Some(directive) = cookie {
        let header = HeaderValue::from_str(&directive.header_value()).map_err(|e| {
            ApiError::InternalServerError(format!("Failed to encode refresh cookie: {}", e))
        })?;
        response.headers_mut().insert(SET_COOKIE, header);
    }

    Ok(response)
}
