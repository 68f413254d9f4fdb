/// Bearer-token authentication middleware for Axum
///
/// Validates the `Authorization: Bearer <jwt>` header and injects an
/// [`AuthContext`] into request extensions. Handlers behind the middleware
/// read it with `Extension<AuthContext>`.
///
/// Failures are answered with the usual KO envelope and a 401 status.
///
/// # Example
///
/// ```no_run
/// use axum::{routing::get, Extension, Router};
/// use pintxopote_shared::auth::middleware::{create_jwt_middleware, AuthContext};
///
/// async fn me(Extension(auth): Extension<AuthContext>) -> String {
///     auth.user_id.to_string()
/// }
///
/// let app: Router = Router::new()
///     .route("/me", get(me))
///     .layer(axum::middleware::from_fn(create_jwt_middleware(
///         "your-secret-key-at-least-32-bytes-long",
///     )));
/// ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::{
    extract::Request,
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;
use uuid::Uuid;

use super::jwt::{validate_token, JwtError};
use crate::envelope::Envelope;

/// Identity of the caller, taken from a validated token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    /// Token subject
    pub user_id: Uuid,
}

impl AuthContext {
    /// Whether the token was issued to `user_id`
    pub fn is_user(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

/// Authentication failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No Authorization header
    #[error("missing authorization token")]
    MissingCredentials,

    /// Header present but not `Bearer <token>`
    #[error("invalid authorization header")]
    InvalidFormat,

    /// Token rejected
    #[error("{0}")]
    InvalidToken(String),
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => AuthError::InvalidToken("token expired".to_string()),
            _ => AuthError::InvalidToken("invalid token".to_string()),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Envelope::<()>::ko(self.to_string());
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

/// Extracts the bearer token from request headers
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingCredentials)?
        .to_str()
        .map_err(|_| AuthError::InvalidFormat)?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::InvalidFormat)
}

/// Validates request headers into an [`AuthContext`]
pub fn authenticate(headers: &HeaderMap, secret: &str) -> Result<AuthContext, AuthError> {
    let token = bearer_token(headers)?;
    let claims = validate_token(token, secret)?;

    Ok(AuthContext { user_id: claims.sub })
}

/// JWT authentication middleware
///
/// # Errors
///
/// Returns [`AuthError`] (401 KO envelope) if the header is missing,
/// malformed, or carries an invalid token
pub async fn jwt_auth_middleware(
    secret: Arc<str>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let context = authenticate(req.headers(), &secret).map_err(|e| {
        debug!(error = %e, path = %req.uri().path(), "Rejected request");
        e
    })?;

    req.extensions_mut().insert(context);

    Ok(next.run(req).await)
}

type MiddlewareFuture = Pin<Box<dyn Future<Output = Result<Response, AuthError>> + Send>>;

/// Builds a middleware closure bound to `secret`, for `axum::middleware::from_fn`
pub fn create_jwt_middleware(
    secret: impl Into<String>,
) -> impl Fn(Request, Next) -> MiddlewareFuture + Clone + Send + Sync + 'static {
    let secret: Arc<str> = Arc::from(secret.into());
    move |req, next| {
        let secret = Arc::clone(&secret);
        Box::pin(jwt_auth_middleware(secret, req, next))
    }
}
