/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use devconnector_api::{app::{build_router, AppState}, config::Config};
/// use devconnector_shared::db::pool::create_pool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(&config.pool_config()).await?;
/// let app = build_router(AppState::new(pool, config));
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, error::ApiError, middleware::security::SecurityHeadersLayer, routes};
use axum::{
    extract::{Request, State},
    http::{header, HeaderName, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use devconnector_shared::auth::middleware::{authenticate, AUTH_TOKEN_HEADER};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned into each handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Secret used to validate identity tokens
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Routes
///
/// ```text
/// /
/// ├── GET /health                      # Health check (public)
/// └── /api/profile
///     ├── GET    /                     # All profiles (public)
///     ├── GET    /user/:user_id        # Profile by user id (public)
///     ├── GET    /me                   # Own profile (auth)
///     ├── POST   /                     # Create/update own profile (auth)
///     ├── DELETE /                     # Delete own profile and user (auth)
///     └── POST   /experience           # Add experience (auth)
/// ```
///
/// # Middleware Stack
///
/// 1. Security headers
/// 2. CORS
/// 3. Request tracing
/// 4. Authentication (private profile routes only)
pub fn build_router(state: AppState) -> Router {
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let public_profile_routes = Router::new()
        .route("/", get(routes::profile::list_profiles))
        .route("/user/:user_id", get(routes::profile::get_profile_by_user_id));

    // route_layer keeps unmatched methods on "/" from being authenticated
    let private_profile_routes = Router::new()
        .route("/me", get(routes::profile::get_own_profile))
        .route(
            "/",
            post(routes::profile::upsert_profile).delete(routes::profile::delete_profile),
        )
        .route("/experience", post(routes::profile::add_experience))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    let profile_routes = public_profile_routes.merge(private_profile_routes);

    Router::new()
        .merge(health_routes)
        .nest("/api/profile", profile_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer(&state.config.api.cors_origins))
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static(AUTH_TOKEN_HEADER),
        ])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}

/// Resolves the caller and injects `AuthContext` into the request
async fn jwt_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_context = authenticate(req.headers(), state.jwt_secret())?;
    req.extensions_mut().insert(auth_context);

    Ok(next.run(req).await)
}
