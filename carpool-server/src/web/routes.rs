//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::matcher::{MatchError, Matcher};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/match", post(match_drivers))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Match drivers to companions.
///
/// The pipeline is synchronous and CPU-bound, so it runs on the blocking
/// pool under the configured deadline. A run that misses the deadline is
/// reported as a timeout; the blocking task itself cannot be cancelled
/// and finishes in the background.
async fn match_drivers(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<MatchDriversResponse>, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: MatchDriversRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "invalid match request body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let request = req
        .into_match_request(state.default_office)
        .map_err(|message| AppError::BadRequest { message })?;

    let graph = state.graph.clone();
    let config = state.config.clone();
    let task = tokio::task::spawn_blocking(move || {
        let outcome = Matcher::new(graph.as_ref(), config.as_ref()).run(&request)?;
        Ok::<_, MatchError>(MatchDriversResponse::from_outcome(&outcome, graph.as_ref()))
    });

    match tokio::time::timeout(state.match_timeout, task).await {
        Ok(Ok(result)) => Ok(Json(result?)),
        Ok(Err(join_error)) => Err(AppError::Internal {
            message: format!("matching task failed: {join_error}"),
        }),
        Err(_) => Err(MatchError::Timeout.into()),
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Timeout { message: String },
    Internal { message: String },
}

impl From<MatchError> for AppError {
    fn from(e: MatchError) -> Self {
        match e {
            MatchError::InvalidRequest(msg) => AppError::BadRequest { message: msg },
            MatchError::Timeout => AppError::Timeout {
                message: e.to_string(),
            },
            MatchError::Graph(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Timeout { message } => (StatusCode::GATEWAY_TIMEOUT, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
