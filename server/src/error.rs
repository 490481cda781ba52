//! HTTP error responses.
//!
//! # Design
//! Every failure leaves the server as `{"code", "message", "details"?}` with a
//! matching status. Validation and malformed input are 400, `NotFound` is 404,
//! and store faults are 500 with the cause kept in the log, not in the body.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use todo_core::{FieldError, ServiceError, ValidationError};

/// JSON body of an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                code: code.to_string(),
                message: message.into(),
                details: None,
            },
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "An internal error occurred",
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::NotFound { id, .. } => Self::not_found(format!("Todo {id} not found")),
            ServiceError::Store(error) => {
                tracing::error!(%error, "store failure");
                Self::internal()
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        let mut api = Self::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", "Validation failed");
        api.body.details = Some(error.errors);
        api
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        // Body read failures (size limit, broken stream) keep axum's status.
        if matches!(rejection, JsonRejection::BytesRejection(_)) {
            let status = rejection.status();
            let code = if status == StatusCode::PAYLOAD_TOO_LARGE {
                "PAYLOAD_TOO_LARGE"
            } else {
                "BAD_REQUEST"
            };
            return Self::new(status, code, rejection.body_text());
        }
        Self::new(
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            rejection.body_text(),
        )
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use todo_core::StoreError;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let error = ServiceError::NotFound {
            id: Uuid::nil(),
            reason: "gone".to_string(),
        };
        let api = ApiError::from(error);
        assert_eq!(api.status, StatusCode::NOT_FOUND);
        assert_eq!(api.body.code, "NOT_FOUND");
    }

    #[test]
    fn store_error_maps_to_500_without_details() {
        let error = ServiceError::Store(StoreError::Database(sqlx_timeout()));
        let api = ApiError::from(error);
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.body.message, "An internal error occurred");
    }

    #[test]
    fn validation_error_lists_fields() {
        let error = ValidationError {
            errors: vec![FieldError::new("task", "should not be empty")],
        };
        let api = ApiError::from(error);
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.body.code, "VALIDATION_ERROR");
        assert_eq!(api.body.details.as_ref().map(Vec::len), Some(1));
    }

    fn sqlx_timeout() -> todo_core::error::SqlxError {
        todo_core::error::SqlxError::PoolTimedOut
    }
}
