use axum::http::StatusCode;

use super::ApiSuccess;

pub async fn health() -> ApiSuccess<&'static str> {
    ApiSuccess::new(StatusCode::OK, "service is healthy", "ok")
}
