use axum::error_handling::HandleErrorLayer;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{BoxError, Router};
use tower::ServiceBuilder;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower::timeout::TimeoutLayer;
use tower::timeout::error::Elapsed;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::routes;
use crate::state::AppState;

pub fn build_app(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(routes::api::health))
        .route("/nearest", post(routes::api::nearest))
        .route("/route", post(routes::api::route))
        .route("/route/display", post(routes::api::route_display))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(TimeoutLayer::new(config.request_timeout()))
                // shared by every route
                .layer(GlobalConcurrencyLimitLayer::new(config.concurrency_limit)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn handle_middleware_error(error: BoxError) -> ApiError {
    if error.is::<Elapsed>() {
        ApiError::new(StatusCode::REQUEST_TIMEOUT, "Request timed out")
    } else {
        ApiError::internal(format!("Unhandled middleware error: {error}"))
    }
}
