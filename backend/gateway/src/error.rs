//! Mapping of domain errors onto HTTP responses.
//!
//! Body shape: `{"status": "fail" | "error", "message": "..."}`. 4xx is `fail`;
//! 5xx is `error` with the detail kept in the log only.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use folio_core::FolioError;
use serde_json::json;
use tracing::error;
use uuid::Uuid;

#[derive(Debug)]
pub struct ApiError(pub FolioError);

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            FolioError::Validation(_) | FolioError::Conflict(_) => StatusCode::BAD_REQUEST,
            FolioError::NotFound(_) => StatusCode::NOT_FOUND,
            FolioError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            FolioError::Forbidden(_) => StatusCode::FORBIDDEN,
            FolioError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            FolioError::Storage(_) | FolioError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<FolioError> for ApiError {
    fn from(err: FolioError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(FolioError::validation(format!("Invalid request body: {}", rejection.body_text())))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (kind, message) = if status.is_server_error() {
            error!(error = %self.0, "Request failed");
            ("error", "Something went wrong".to_string())
        } else {
            ("fail", self.0.to_string())
        };
        (status, Json(json!({ "status": kind, "message": message }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Parse a path id, reporting a malformed one the same way as a missing one.
pub fn parse_id(raw: &str, not_found: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError(FolioError::not_found(not_found)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_status_codes() {
        assert_eq!(ApiError(FolioError::conflict("dup")).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError(FolioError::not_found("x")).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError(FolioError::Storage("disk".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn malformed_id_is_not_found() {
        let err = parse_id("not-a-uuid", "No contact found with that ID").unwrap_err();
        assert!(matches!(err.0, FolioError::NotFound(ref m) if m == "No contact found with that ID"));
    }
}
