//! The JSON envelope every catalog endpoint answers with.
//!
//! ```json
//! { "success": true,  "data": { "items": [...], "count": 2 } }
//! { "success": false, "error": { "code": "NOT_FOUND", "message": "..." } }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fitdex_core::{ErrorResponse, FitdexError};
use serde::{Deserialize, Serialize};

/// Envelope around a catalog payload or a failure.
///
/// Exactly one of `data` and `error` is present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorResponse>,
}

impl<T> ApiResponse<T> {
    /// Wraps a page, search result, exercise or facet list.
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    /// Wraps a failure. Failures never carry data.
    pub fn failure(error: ErrorResponse) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

/// A catalog error on its way out of a handler.
///
/// The status comes from [`FitdexError::status_code`]: unknown exercises
/// are 404, bad ids 400, and source failures 500. Only 5xx errors are
/// logged at error level.
#[derive(Debug)]
pub struct AppError(pub FitdexError);

impl From<FitdexError> for AppError {
    fn from(err: FitdexError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(error = %self.0, code = self.0.error_code(), "Catalog request failed");
        } else {
            tracing::debug!(error = %self.0, code = self.0.error_code(), "Catalog request rejected");
        }

        let body = ApiResponse::failure(ErrorResponse::from_error(&self.0));
        (status, Json(body)).into_response()
    }
}

/// What catalog handlers return.
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

/// Answers 200 with `data` in the success envelope.
pub fn ok<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(data)))
}
