//! API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use storyweave_core::error::DomainError;
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `DomainError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            // Validation already carries a machine code; surface it as-is.
            DomainError::Validation { code, .. } => (StatusCode::BAD_REQUEST, *code),
            DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            DomainError::Forbidden(_) => (StatusCode::FORBIDDEN, "forbidden"),
            DomainError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            DomainError::RuleViolation(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "rule_violation")
            }
            DomainError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "storage_error"),
        };

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use storyweave_core::error::ResourceKind;
    use uuid::Uuid;

    fn status_of(err: DomainError) -> StatusCode {
        let response = ApiError(err).into_response();
        response.status()
    }

    #[test]
    fn test_validation_maps_to_400() {
        assert_eq!(
            status_of(DomainError::Validation {
                code: "empty_title",
                message: "title must not be empty".into(),
            }),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let id = Uuid::new_v4();
        assert_eq!(
            status_of(DomainError::NotFound {
                kind: ResourceKind::Chapter,
                reference: id.to_string(),
            }),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_forbidden_maps_to_403() {
        assert_eq!(
            status_of(DomainError::Forbidden("viewers may not write".into())),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_conflict_maps_to_409() {
        assert_eq!(
            status_of(DomainError::Conflict("chapter version changed".into())),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_rule_violation_maps_to_422() {
        assert_eq!(
            status_of(DomainError::RuleViolation("cannot merge an open proposal".into())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_storage_maps_to_500() {
        assert_eq!(
            status_of(DomainError::Storage("store lock poisoned".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_validation_code_surfaces_in_the_body() {
        // Arrange
        let err = DomainError::Validation {
            code: "empty_rejection_reason",
            message: "a rejection needs a reason".into(),
        };

        // Act
        let response = ApiError(err).into_response();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

        // Assert
        assert_eq!(json["error"], "empty_rejection_reason");
        assert_eq!(
            json["message"],
            "validation failed [empty_rejection_reason]: a rejection needs a reason"
        );
    }
}
