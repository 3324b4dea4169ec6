use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use async_graphql::ErrorExtensions;
use serde_json::{Map, Value, json};
use thiserror::Error;
use validator::ValidationErrors;

use crate::auth::AuthError;

/// The single error type handlers and resolvers surface to clients.
///
/// REST handlers return it directly (`ResponseError`), GraphQL resolvers go
/// through [`ErrorExtensions::extend`] so the same `code` shows up in
/// `errors[].extensions.code`.
///
/// | Variant | Status | `code` |
/// |---------|--------|--------|
/// | `BadRequest` | 400 | `BAD_REQUEST` |
/// | `Unauthorized` | 401 | `UNAUTHORIZED` |
/// | `Validation` | 400 | `VALIDATION_ERROR` |
/// | `NotFound` | 404 | `NOT_FOUND` |
/// | `Conflict` | 409 | `CONFLICT` |
/// | `Internal` | 500 | `INTERNAL_SERVER_ERROR` |
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body could not be read as the expected shape
    /// (malformed JSON, wrong field types, wrong content type).
    #[error("{0}")]
    BadRequest(String),
    /// Missing or rejected credentials. The message is safe to show clients.
    #[error("{0}")]
    Unauthorized(String),
    /// Well-formed input that broke a field constraint; the body lists each
    /// offending field under `fields`.
    #[error("validation failed")]
    Validation(#[from] ValidationErrors),
    /// The named resource does not exist, or is not visible to the caller.
    #[error("{0} not found")]
    NotFound(&'static str),
    /// The request clashes with the resource's current state, e.g. accepting
    /// an invitation twice.
    #[error("{0}")]
    Conflict(String),
    /// Server-side failure. The detail is logged and never sent to clients.
    #[error("internal server error")]
    Internal(String),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Signing(inner) => ApiError::Internal(format!("token signing: {}", inner)),
            AuthError::LifetimeOutOfRange => ApiError::Internal("token lifetime out of range".to_string()),
            other => ApiError::Unauthorized(other.to_string()),
        }
    }
}

/// Flattens validator output into `{ field: [message, ...] }`.
pub fn field_messages(errors: &ValidationErrors) -> Map<String, Value> {
    let mut fields = Map::new();
    for (field, errs) in errors.field_errors() {
        let messages = errs
            .iter()
            .map(|e| match &e.message {
                Some(message) => Value::String(message.to_string()),
                None => Value::String(format!("{} is invalid ({})", field, e.code)),
            })
            .collect();
        fields.insert(field.to_string(), Value::Array(messages));
    }
    fields
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Validation(errors) => json!({
                "error": self.code(),
                "message": self.to_string(),
                "fields": field_messages(errors),
            }),
            ApiError::Internal(detail) => {
                tracing::error!(detail = %detail, "internal error");
                json!({ "error": self.code(), "message": self.to_string() })
            }
            _ => json!({ "error": self.code(), "message": self.to_string() }),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        if let ApiError::Internal(detail) = self {
            tracing::error!(detail = %detail, "internal error");
        }

        async_graphql::Error::new(self.to_string()).extend_with(|_, e| {
            e.set("code", self.code());
            if let ApiError::Validation(errors) = self {
                let fields: Vec<String> = errors
                    .field_errors()
                    .keys()
                    .map(|k| k.to_string())
                    .collect();
                e.set("fields", fields);
            }
        })
    }
}
