/// Authentication middleware for Axum
///
/// Resolves the caller's identity from a JWT and adds it to the request
/// extensions so private handlers can read it.
///
/// # Token Sources
///
/// - `Authorization: Bearer <token>` (checked first)
/// - `x-auth-token: <token>` (the header the DevConnector front-end sends)
///
/// # Request Extensions
///
/// After successful authentication, middleware adds:
/// - `AuthContext`: Contains the authenticated user_id
///
/// # Example
///
/// ```no_run
/// use axum::{Router, routing::get, middleware, Extension};
/// use devconnector_shared::auth::middleware::{create_jwt_middleware, AuthContext};
///
/// async fn protected_handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("Hello, user {}!", auth.user_id)
/// }
///
/// let app: Router = Router::new()
///     .route("/protected", get(protected_handler))
///     .layer(middleware::from_fn(create_jwt_middleware("your-jwt-secret")));
/// ```

use axum::{
    extract::Request,
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwt::{validate_token, JwtError};

/// Header carrying a bare token, as sent by the DevConnector front-end
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Authentication context added to request extensions
///
/// Handlers extract it using Axum's `Extension` extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: Uuid,
}

impl AuthContext {
    /// Creates auth context for an authenticated user
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

/// Error type for authentication middleware
#[derive(Debug)]
pub enum AuthError {
    /// No token in either supported header
    MissingCredentials,

    /// Authorization header present but not a Bearer token
    InvalidFormat(String),

    /// Token validation failed
    InvalidToken(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::MissingCredentials => {
                (StatusCode::UNAUTHORIZED, "No token, authorization denied").into_response()
            }
            AuthError::InvalidFormat(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AuthError::InvalidToken(msg) => (StatusCode::UNAUTHORIZED, msg).into_response(),
        }
    }
}

/// Pulls the raw token out of the request headers
///
/// # Errors
///
/// - `AuthError::MissingCredentials` if neither header is present
/// - `AuthError::InvalidFormat` if `Authorization` is not a Bearer token
pub fn extract_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        let value = value
            .to_str()
            .map_err(|_| AuthError::InvalidFormat("Invalid authorization header".to_string()))?;

        return value
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()));
    }

    headers
        .get(AUTH_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingCredentials)
}

/// Resolves the caller's identity from the request headers
pub fn authenticate(headers: &HeaderMap, secret: &str) -> Result<AuthContext, AuthError> {
    let token = extract_token(headers)?;

    let claims = validate_token(token, secret).map_err(|e| match e {
        JwtError::Expired => AuthError::InvalidToken("Token expired".to_string()),
        JwtError::InvalidIssuer { .. } => AuthError::InvalidToken("Invalid issuer".to_string()),
        _ => AuthError::InvalidToken("Token is not valid".to_string()),
    })?;

    Ok(AuthContext::new(claims.sub))
}

/// JWT authentication middleware
///
/// Validates the token and adds `AuthContext` to the request extensions.
///
/// # Errors
///
/// Returns 401 Unauthorized if the token is missing, invalid or expired,
/// and 400 Bad Request if the Authorization header is malformed.
pub async fn jwt_auth_middleware(
    secret: String,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_context = authenticate(req.headers(), &secret)?;

    tracing::debug!(user_id = %auth_context.user_id, "Request authenticated");
    req.extensions_mut().insert(auth_context);

    Ok(next.run(req).await)
}

/// Creates a JWT authentication middleware closure
///
/// Helper function that captures the JWT secret and returns a middleware function.
pub fn create_jwt_middleware(
    secret: impl Into<String>,
) -> impl Fn(Request, Next) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AuthError>> + Send>> + Clone {
    let secret = secret.into();
    move |req, next| {
        let secret = secret.clone();
        Box::pin(jwt_auth_middleware(secret, req, next))
    }
}
