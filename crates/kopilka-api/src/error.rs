//! Error types for kopilka-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use kopilka_core::{CoreError, ErrorDetails};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            ApiError::Core(CoreError::ValidationError { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Core(CoreError::DuplicateEntry { .. }) => StatusCode::CONFLICT,
            ApiError::Core(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn to_details(&self) -> ErrorDetails {
        match self {
            ApiError::Core(e) => e.to_details(),
        }
    }
}

/// JSON error body: `{"error": {...details}}`
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let details = self.to_details();
        log::debug!("API error ({}): {}", status, details);
        (status, Json(serde_json::json!({ "error": details }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use kopilka_core::ErrorCode;

    #[test]
    fn test_status_mapping() {
        let not_found = ApiError::from(CoreError::TransactionNotFound { id: "9".to_string() });
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let invalid = ApiError::from(CoreError::ValidationError {
            field: "title".to_string(),
            message: "title must not be empty".to_string(),
        });
        assert_eq!(invalid.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let duplicate = ApiError::from(CoreError::DuplicateEntry { id: "1".to_string() });
        assert_eq!(duplicate.status(), StatusCode::CONFLICT);

        let invalid_op = ApiError::from(CoreError::InvalidOperation { message: "x".to_string() });
        assert_eq!(invalid_op.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_details_carry_core_code() {
        let err = ApiError::from(CoreError::CategoryNotFound { id: "7".to_string() });
        let details = err.to_details();
        assert_eq!(details.code, ErrorCode::CategoryNotFound);
        assert!(details.message.contains('7'));
    }
}
