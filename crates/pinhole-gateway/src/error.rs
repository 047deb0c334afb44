use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pinhole_core::RegistryError;
use tracing::{debug, error};

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    /// A registry operation failed.
    Registry(RegistryError),
    /// The request body could not be read as JSON.
    MalformedBody(String),
    /// No route matched.
    RouteNotFound,
    /// The path matched but not for this method.
    MethodNotAllowed,
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Registry(err) => match err {
                RegistryError::InvalidUrl(_) => (StatusCode::BAD_REQUEST, "Invalid or missing URL."),
                RegistryError::InvalidShortcodeFormat(_) => (
                    StatusCode::BAD_REQUEST,
                    "Shortcode must be alphanumeric and 3-16 chars.",
                ),
                RegistryError::ShortcodeCollision(_) => {
                    (StatusCode::CONFLICT, "Shortcode already in use.")
                }
                RegistryError::NotFound(_) => (StatusCode::NOT_FOUND, "Shortcode not found."),
                RegistryError::Expired(_) => (StatusCode::GONE, "Short link has expired."),
                RegistryError::GenerationExhausted(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Could not allocate a shortcode.",
                ),
                RegistryError::Storage(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.")
                }
            },
            AppError::MalformedBody(_) => {
                (StatusCode::BAD_REQUEST, "Request body must be a JSON object.")
            }
            AppError::RouteNotFound => (StatusCode::NOT_FOUND, "Not found."),
            AppError::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed."),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            error!(error = ?self, "request failed");
        } else {
            debug!(error = ?self, %status, "request rejected");
        }

        (
            status,
            Json(ErrorResponse {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<RegistryError> for AppError {
    fn from(err: RegistryError) -> Self {
        AppError::Registry(err)
    }
}

impl From<pinhole_core::StorageError> for AppError {
    fn from(err: pinhole_core::StorageError) -> Self {
        AppError::Registry(err.into())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::MalformedBody(rejection.body_text())
    }
}
