//! Error types for the gateway layer

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hotel_operations::OperationError;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use utoipa::ToSchema;

/// Gateway error types
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// JSON body returned for every failed request.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::Conflict(_) => StatusCode::CONFLICT,
            GatewayError::InternalError(_) | GatewayError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let error_response = json!({
            "error": status.as_str(),
            "message": self.to_string(),
        });

        (status, Json(error_response)).into_response()
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

impl From<OperationError> for GatewayError {
    fn from(error: OperationError) -> Self {
        match error {
            OperationError::NotFound { .. } => GatewayError::NotFound(error.to_string()),
            OperationError::Validation { message } => GatewayError::InvalidRequest(message),
            OperationError::Conflict { message } => GatewayError::Conflict(message),
            OperationError::Database(inner) => GatewayError::DatabaseError(inner.to_string()),
        }
    }
}

impl From<hotel_database::DatabaseError> for GatewayError {
    fn from(error: hotel_database::DatabaseError) -> Self {
        OperationError::from(error).into()
    }
}

impl From<sqlx::Error> for GatewayError {
    fn from(error: sqlx::Error) -> Self {
        GatewayError::DatabaseError(error.to_string())
    }
}

impl From<JsonRejection> for GatewayError {
    fn from(rejection: JsonRejection) -> Self {
        GatewayError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for GatewayError {
    fn from(rejection: QueryRejection) -> Self {
        GatewayError::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for GatewayError {
    fn from(rejection: PathRejection) -> Self {
        GatewayError::InvalidRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_errors_map_to_statuses() {
        let cases = [
            (OperationError::not_found("hotel", 9), StatusCode::NOT_FOUND),
            (OperationError::validation("bad"), StatusCode::BAD_REQUEST),
            (OperationError::conflict("taken"), StatusCode::CONFLICT),
            (
                OperationError::Database(hotel_database::DatabaseError::QueryError("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(GatewayError::from(error).status_code(), expected);
        }
    }

    #[test]
    fn test_duplicate_database_error_is_conflict() {
        let error = GatewayError::from(hotel_database::DatabaseError::Duplicate(
            "room 101 already exists".into(),
        ));
        assert_eq!(error.status_code(), StatusCode::CONFLICT);
    }
}
