/// Middleware for the API server
///
/// Authentication lives in `devconnector_shared::auth::middleware`; this
/// module holds response-level concerns.

pub mod security;
