use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use invoicer_infra::ServiceError;

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        ServiceError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        ServiceError::NotFound(_) => json_error(StatusCode::NOT_FOUND, "not_found", err.to_string()),
        ServiceError::CreateFailed => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "create_failed", err.to_string())
        }
        ServiceError::QueryFailed => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "query_failed", err.to_string())
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
