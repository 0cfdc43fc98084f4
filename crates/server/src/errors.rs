use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::errors::ModelError;
use service::errors::{FieldErrors, ServiceError};
use thiserror::Error;
use tracing::error;

/// Error body returned by every admin handler:
/// `{"error": <title>, "detail": <message>, "fields": {...}}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub detail: String,
    pub fields: Option<FieldErrors>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &'static str, detail: impl Into<String>) -> Self {
        Self { status, title, detail: detail.into(), fields: None }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "bad request", detail)
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        let detail = e.to_string();
        match e {
            ServiceError::Validation(_) | ServiceError::Model(ModelError::Validation(_)) => {
                Self::new(StatusCode::BAD_REQUEST, "validation failed", detail)
            }
            ServiceError::Invalid(fields) => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                title: "invalid fields",
                detail,
                fields: Some(fields),
            },
            ServiceError::NotFound(_) | ServiceError::Model(ModelError::NotFound(_)) => {
                Self::new(StatusCode::NOT_FOUND, "not found", detail)
            }
            ServiceError::Conflict(_) => Self::new(StatusCode::CONFLICT, "conflict", detail),
            ServiceError::Db(_) | ServiceError::Storage(_) | ServiceError::Model(ModelError::Db(_)) => {
                error!(error = %detail, "request failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal error", detail)
            }
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let mut body = serde_json::json!({ "error": self.title, "detail": self.detail });
        if let Some(fields) = self.fields {
            body["fields"] = serde_json::to_value(fields).unwrap_or_default();
        }
        (self.status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("runtime check failed: {0}")]
    Runtime(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_service_errors_to_status() {
        let cases = [
            (ServiceError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (ServiceError::Invalid(FieldErrors::default()), StatusCode::UNPROCESSABLE_ENTITY),
            (ServiceError::not_found("workshop"), StatusCode::NOT_FOUND),
            (ServiceError::Conflict("dup".into()), StatusCode::CONFLICT),
            (ServiceError::Model(ModelError::Validation("bad".into())), StatusCode::BAD_REQUEST),
            (ServiceError::Db("down".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(JsonApiError::from(err).status, status);
        }
    }
}
