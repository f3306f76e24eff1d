use super::{errors::AppError, state::AppState, types::DebugParams};
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use labelcheck::{
    diagnostics::environment_report, is_env_debug, parse_body, require_object, verify,
};
use tracing::info;

// --- Route Handlers ---

pub async fn root() -> &'static str {
    "labelcheck server is running."
}

pub async fn health_check() -> &'static str {
    "OK"
}

/// The main verification handler.
///
/// Takes the raw body as a string and parses it itself, so that a malformed
/// body maps to the 500 contract of this endpoint rather than to an
/// extractor-level rejection. Dispatches to the diagnostics path when the
/// debug flag (query parameter first, `_debug` body field second) equals
/// `"env"`, case-insensitively. The debug dispatch happens before the body's
/// object shape is enforced; `?debug=env` reaches diagnostics with any
/// well-formed JSON body.
pub async fn verify_handler(
    State(app_state): State<AppState>,
    Query(params): Query<DebugParams>,
    raw_body: String,
) -> Result<Response, AppError> {
    info!("Received verification payload: {raw_body}");

    let body = parse_body(&raw_body)?;
    info!(body = %body, "Resolved request body");

    if is_env_debug(params.debug.as_deref(), &body) {
        let report = environment_report(&app_state.ocr_engine).await;
        return Ok(Json(report).into_response());
    }

    let body = require_object(body)?;
    let result = verify(&body, &app_state.ocr_engine).await;
    Ok(Json(result).into_response())
}
