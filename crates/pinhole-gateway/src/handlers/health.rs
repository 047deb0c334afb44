use crate::error::AppError;
use crate::model::HealthResponse;
use axum::Json;

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "URL Shortener Backend Running".to_string(),
    })
}

pub async fn not_found_handler() -> AppError {
    AppError::RouteNotFound
}

pub async fn method_not_allowed_handler() -> AppError {
    AppError::MethodNotAllowed
}
