use std::sync::Arc;
use std::time::Duration;

use auth::TokenDeliveryPolicy;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::login::login;
use super::handlers::refresh::refresh_token;
use super::handlers::token::token;
use crate::session::ports::SessionServicePort;

#[derive(Clone)]
pub struct AppState {
    pub session_service: Arc<dyn SessionServicePort>,
    pub delivery_policy: TokenDeliveryPolicy,
}

pub fn create_router(
    session_service: Arc<dyn SessionServicePort>,
    delivery_policy: TokenDeliveryPolicy,
) -> Router {
    let state = AppState {
        session_service,
        delivery_policy,
    };

    let auth_routes = Router::new()
        .route("/auth/token", post(token))
        .route("/auth/login", post(login))
        .route("/auth/refresh_token", get(refresh_token));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(auth_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
