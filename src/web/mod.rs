//! HTTP surface of the survey.
//!
//! Every response body is a JSON envelope with a `success` flag; failures
//! carry only a `message`.

pub mod app;
pub mod handlers;
pub mod state;

use crate::core::SurveyError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

pub use app::build_router;
pub use state::AppState;

/// Header the initiator may use instead of the `secret` query parameter.
pub const INITIATOR_SECRET_HEADER: &str = "x-initiator-secret";

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[derive(Debug)]
pub enum WebError {
    Survey(SurveyError),
    MalformedBody(String),
}

impl From<SurveyError> for WebError {
    fn from(err: SurveyError) -> Self {
        WebError::Survey(err)
    }
}

impl From<JsonRejection> for WebError {
    fn from(rejection: JsonRejection) -> Self {
        WebError::MalformedBody(rejection.body_text())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            WebError::Survey(SurveyError::Validation(reason)) => {
                (StatusCode::BAD_REQUEST, reason.to_string())
            }
            WebError::Survey(SurveyError::Unauthorized) => {
                (StatusCode::FORBIDDEN, "unauthorized".to_string())
            }
            WebError::Survey(err @ SurveyError::Storage(_)) => {
                tracing::error!(error = %err, "survey store failure");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            WebError::MalformedBody(detail) => (
                StatusCode::BAD_REQUEST,
                format!("malformed request: {}", detail),
            ),
        };

        (status, Json(MessageResponse::failure(message))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, WebError>;
