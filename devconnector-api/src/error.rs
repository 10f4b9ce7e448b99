/// Error handling for the API server
///
/// All handlers return `Result<T, ApiError>`, which converts to an HTTP
/// response with a JSON body:
///
/// ```json
/// { "error": "validation_error", "msg": "Request validation failed",
///   "errors": [{ "field": "status", "message": "Status is required" }] }
/// ```
///
/// Missing resources are reported with 400, not 404, to stay compatible
/// with existing DevConnector clients.
///
/// # Example
///
/// ```
/// use devconnector_api::error::{ApiError, ApiResult};
/// use axum::Json;
///
/// async fn handler(found: bool) -> ApiResult<Json<&'static str>> {
///     if !found {
///         return Err(ApiError::NotFound("Profile not found".to_string()));
///     }
///     Ok(Json("ok"))
/// }
/// ```

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use devconnector_shared::auth::{jwt::JwtError, middleware::AuthError};
use serde::{Deserialize, Serialize};

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Message returned for every internal failure
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// Unified API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad request (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Unauthorized (401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Requested resource does not exist (400)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request body failed validation (400)
    #[error("Validation failed: {} errors", .0.len())]
    ValidationError(Vec<ValidationErrorDetail>),

    /// Storage or other internal failure (500); detail is logged, not returned
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Validation error detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

impl ValidationErrorDetail {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "not_found", "validation_error")
    pub error: String,

    /// Human-readable error message
    pub msg: String,

    /// Field-level validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ValidationErrorDetail>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, msg, errors) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg, None),
            ApiError::NotFound(msg) => (StatusCode::BAD_REQUEST, "not_found", msg, None),
            ApiError::ValidationError(errors) => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                "Request validation failed".to_string(),
                Some(errors),
            ),
            ApiError::InternalError(detail) => {
                tracing::error!(error = %detail, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    SERVER_ERROR_MESSAGE.to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            msg,
            errors,
        });

        (status, body).into_response()
    }
}

/// Every database fault is a storage failure
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::InternalError(format!("Database error: {}", err))
    }
}

/// Flattens validator output into one entry per violated rule
impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut errors: Vec<ValidationErrorDetail> = err
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    ValidationErrorDetail::new(
                        field.to_string(),
                        error
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| "Validation failed".to_string()),
                    )
                })
            })
            .collect();
        errors.sort_by(|a, b| a.field.cmp(&b.field));

        ApiError::ValidationError(errors)
    }
}

/// Unparsable or mistyped JSON bodies are client errors
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredentials => {
                ApiError::Unauthorized("No token, authorization denied".to_string())
            }
            AuthError::InvalidFormat(msg) => ApiError::BadRequest(msg),
            AuthError::InvalidToken(msg) => ApiError::Unauthorized(msg),
        }
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => ApiError::Unauthorized("Token expired".to_string()),
            JwtError::CreateError(msg) => ApiError::InternalError(msg),
            _ => ApiError::Unauthorized("Token is not valid".to_string()),
        }
    }
}
