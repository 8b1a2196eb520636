//! # Error Responses
//!
//! `ApiError` is the one place handler failures become HTTP responses.
//! Every handler returns `Result<_, ApiError>`; `?` on any `ShopResult`
//! short-circuits the rest of the request into here.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shop_core::ShopError;
use tracing::{error, warn};

/// Error page payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}

/// Handler error wrapping a `ShopError`
#[derive(Debug)]
pub struct ApiError(pub ShopError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<ShopError> for ApiError {
    fn from(err: ShopError) -> Self {
        Self(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Server-side detail stays in the logs
        let message = if self.0.is_client_error() {
            warn!(error = %self.0, status = status.as_u16(), "Request rejected");
            self.0.to_string()
        } else {
            error!(error = %self.0, status = status.as_u16(), "Request failed");
            status
                .canonical_reason()
                .unwrap_or("Internal Server Error")
                .to_string()
        };

        (status, Json(ErrorResponse::new(message, status.as_u16()))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
