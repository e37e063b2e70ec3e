use axum::extract::State;
use axum::http::StatusCode;
use axum::Form;
use chrono::Utc;
use serde::Deserialize;

use super::AccessTokenData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenRequestBody {
    username: String,
    password: String,
}

/// Handler for `POST /auth/token`: OAuth2 password-grant shaped login.
///
/// Accepts a form body and returns only the access token; the refresh
/// token issued alongside it is discarded.
pub async fn token(
    State(state): State<AppState>,
    Form(body): Form<TokenRequestBody>,
) -> Result<ApiSuccess<AccessTokenData>, ApiError> {
    let pair = state
        .session_service
        .authenticate(&body.username, &body.password, Utc::now())
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        AccessTokenData {
            access_token: pair.access_token,
            token_type: pair.token_type,
        },
    ))
}
