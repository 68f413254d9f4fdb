/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use pintxopote_api::{app::AppState, config::Config};
/// use pintxopote_shared::db::pool::create_pool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(config.database.clone()).await?;
/// let state = AppState::new(pool, config);
/// let app = pintxopote_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use pintxopote_shared::auth::middleware::create_jwt_middleware;
use sqlx::PgPool;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::{config::Config, error::ApiError};

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Secret used to sign and validate bearer tokens
    pub fn jwt_secret(&self) -> &str {
        &self.config.token.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Routes
///
/// ```text
/// /
/// ├── GET  /health              # Health check (public)
/// ├── POST /users               # Register (public)
/// ├── POST /auth                # Issue token (public)
/// ├── GET  /users/:id           # Profile (bearer)
/// ├── PUT  /users/:id           # Update profile (bearer)
/// ├── GET  /pintxopotes?city=   # Today's deals in a city (public)
/// ├── GET  /pintxopotes/:id     # Single deal (public)
/// ├── GET  /pubs/:id            # Pub with its deals (public)
/// ├── POST /orders              # Place order (bearer)
/// └── GET  /orders?userId=      # List orders (bearer)
/// ```
///
/// # Middleware Stack
///
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Bearer authentication (protected routes only)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let public_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/users", post(routes::users::register))
        .route("/auth", post(routes::auth::authenticate))
        .route("/pintxopotes", get(routes::pintxopotes::list_by_city))
        .route("/pintxopotes/:id", get(routes::pintxopotes::get_by_id))
        .route("/pubs/:id", get(routes::pubs::get_by_id));

    let protected_routes = Router::new()
        .route(
            "/users/:id",
            get(routes::users::retrieve).put(routes::users::update),
        )
        .route(
            "/orders",
            post(routes::orders::create).get(routes::orders::list_by_user),
        )
        .route_layer(axum::middleware::from_fn(create_jwt_middleware(
            state.jwt_secret(),
        )));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer(&state.config))
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.allows_any_origin() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600))
}

async fn not_found() -> ApiError {
    ApiError::NotFound("not found".to_string())
}
