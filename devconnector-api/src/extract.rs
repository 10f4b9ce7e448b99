/// Request body extractor for form-style JSON endpoints
///
/// Behaves like `axum::Json`, except that a request without a JSON content
/// type or with an empty body yields `T::default()`, so field validation
/// reports every missing field. Malformed JSON becomes an [`ApiError`]
/// instead of axum's plain-text rejection.

use crate::error::ApiError;
use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap},
    Json,
};
use serde::de::DeserializeOwned;

/// JSON body that falls back to the default value when absent
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

fn has_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = has_json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        if !is_json || bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        let Json(value) = Json::<T>::from_bytes(&bytes)?;
        Ok(Self(value))
    }
}
