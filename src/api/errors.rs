use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use crate::errors::SeezoError;

impl IntoResponse for SeezoError {
    fn into_response(self) -> axum::response::Response {
        let status = if self.is_configuration() {
            StatusCode::BAD_REQUEST
        } else if matches!(self, SeezoError::Authentication(_)) {
            StatusCode::UNAUTHORIZED
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        let message = self.to_string();

        (status, Json(json!({"error": message, "detail": message}))).into_response()
    }
}
