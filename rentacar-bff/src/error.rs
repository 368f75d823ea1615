use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// The BFF's only user-visible failure: a generic 500 with a stable message.
/// The underlying cause is logged, never surfaced.
#[derive(Debug)]
pub struct AppError {
    message: &'static str,
}

impl AppError {
    pub fn internal<E: std::fmt::Display>(message: &'static str, cause: E) -> Self {
        tracing::error!("{}: {}", message, cause);
        Self { message }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "message": self.message,
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
