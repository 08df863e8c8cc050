use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use domain::FieldError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error on {} field(s)", .fields.len())]
    Validation { fields: Vec<FieldError> },

    #[error("Invalid id format")]
    InvalidId,

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl From<domain::Error> for ApiError {
    fn from(err: domain::Error) -> Self {
        match err {
            domain::Error::Validation { fields } => Self::Validation { fields },
            domain::Error::InvalidId => Self::InvalidId,
            other => Self::Internal {
                message: other.to_string(),
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let code = match &rejection {
            JsonRejection::JsonDataError(_) => "invalid_value",
            JsonRejection::JsonSyntaxError(_) => "invalid_json",
            JsonRejection::MissingJsonContentType(_) => "missing_content_type",
            _ => "invalid_body",
        };
        Self::Validation {
            fields: vec![FieldError::new(
                "body".to_string(),
                code.to_string(),
                rejection.body_text(),
            )],
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation {
            fields: vec![FieldError::new(
                "query".to_string(),
                "invalid_value".to_string(),
                rejection.body_text(),
            )],
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::Validation { fields } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "error": "validation_error",
                    "message": "Request validation failed",
                    "fields": fields,
                }),
            ),
            Self::InvalidId => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "bad_request", "message": "Invalid id format" }),
            ),
            Self::Internal { message } => {
                tracing::error!("Request failed: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "internal_error", "message": "Internal Server Error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use domain::{id::parse_id, StoreError};

    use super::*;

    #[test]
    fn invalid_id_maps_to_bad_request() {
        let err: ApiError = parse_id("nope").unwrap_err().into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_failures_map_to_internal_error() {
        let err: ApiError =
            domain::Error::from(StoreError::Backend("connection refused".into())).into();
        assert!(matches!(err, ApiError::Internal { .. }));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_maps_to_unprocessable_entity() {
        let err = ApiError::Validation {
            fields: vec![FieldError::new(
                "price".into(),
                "range".into(),
                "must be greater than or equal to 0.0".into(),
            )],
        };
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
