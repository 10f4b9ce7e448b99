/// Authentication utilities
///
/// Identity for the private profile endpoints is carried by a signed JWT.
/// Issuing tokens (registration and login) is handled elsewhere; this
/// crate only validates them and exposes the caller's user id.
///
/// # Modules
///
/// - [`jwt`]: JWT token generation and validation
/// - [`middleware`]: Axum middleware resolving the caller into an [`middleware::AuthContext`]
///
/// # Example
///
/// ```
/// use devconnector_shared::auth::jwt::{create_token, validate_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let claims = Claims::new(Uuid::new_v4());
/// let token = create_token(&claims, "secret-key")?;
/// assert_eq!(validate_token(&token, "secret-key")?.sub, claims.sub);
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod middleware;
