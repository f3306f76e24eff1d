use super::{handlers, state::AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Creates the Axum router with all the application routes.
///
/// `/images` is the path the deployed submission frontend posts to; it is an
/// alias for `/verify` and delegates to the same handler unchanged.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/verify", post(handlers::verify_handler))
        .route("/images", post(handlers::verify_handler))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
