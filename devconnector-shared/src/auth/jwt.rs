/// JWT token generation and validation module
///
/// Tokens identify the caller of the private profile endpoints. They are
/// signed using HS256 (HMAC-SHA256) and carry the user id as the subject.
///
/// # Security
///
/// - **Algorithm**: HS256 (HMAC with SHA-256)
/// - **Expiration**: 24 hours by default, configurable per token
/// - **Validation**: Signature, expiration, not-before and issuer checks
/// - **Secret Management**: Secrets should be at least 32 bytes (256 bits)
///
/// # Example
///
/// ```
/// use devconnector_shared::auth::jwt::{create_token, validate_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let user_id = Uuid::new_v4();
///
/// let claims = Claims::new(user_id);
/// let token = create_token(&claims, "your-secret-key")?;
///
/// let validated_claims = validate_token(&token, "your-secret-key")?;
/// assert_eq!(validated_claims.sub, user_id);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Issuer written into and required from every token
pub const ISSUER: &str = "devconnector";

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Failed to validate token
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Invalid issuer
    #[error("Invalid issuer: expected {expected}")]
    InvalidIssuer { expected: String },
}

/// JWT claims structure
///
/// - `sub`: Subject (user ID)
/// - `iss`: Issuer (always "devconnector")
/// - `iat`: Issued at timestamp
/// - `exp`: Expiration timestamp
/// - `nbf`: Not before timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - User ID
    pub sub: Uuid,

    /// Issuer - Always "devconnector"
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,
}

impl Claims {
    /// Default lifetime of a token
    pub fn default_expiration() -> Duration {
        Duration::hours(24)
    }

    /// Creates new claims for `user_id` with the default expiration
    pub fn new(user_id: Uuid) -> Self {
        Self::with_expiration(user_id, Self::default_expiration())
    }

    /// Creates claims with a custom expiration
    ///
    /// A negative duration produces an already expired token, which is
    /// handy in tests.
    ///
    /// # Example
    ///
    /// ```
    /// use devconnector_shared::auth::jwt::Claims;
    /// use chrono::Duration;
    /// use uuid::Uuid;
    ///
    /// let claims = Claims::with_expiration(Uuid::new_v4(), Duration::hours(1));
    /// assert!(!claims.is_expired());
    /// ```
    pub fn with_expiration(user_id: Uuid, expires_in: Duration) -> Self {
        let now = Utc::now();
        let expiration = now + expires_in;

        Self {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            nbf: now.timestamp(),
        }
    }

    /// Checks if token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Gets time until expiration
    pub fn time_until_expiration(&self) -> Option<Duration> {
        let now = Utc::now().timestamp();
        if self.exp > now {
            Some(Duration::seconds(self.exp - now))
        } else {
            None
        }
    }
}

/// Creates a JWT token from claims
///
/// Signs the token using HS256 with the provided secret.
///
/// # Errors
///
/// Returns `JwtError::CreateError` if token creation fails
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a JWT token and extracts claims
///
/// Verifies:
/// - Signature is valid
/// - Token hasn't expired
/// - Issuer is "devconnector"
/// - Token is not used before nbf time
///
/// # Errors
///
/// Returns `JwtError::Expired` for expired tokens, `JwtError::InvalidIssuer`
/// for tokens signed by someone else, and `JwtError::ValidationError` for
/// anything else (bad signature, malformed token).
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.validate_nbf = true;
    validation.leeway = 0;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidIssuer => JwtError::InvalidIssuer {
            expected: ISSUER.to_string(),
        },
        _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}
