/// Error handling for the API server
///
/// Every handler returns `ApiResult<T>`. Errors render as the KO envelope,
/// `{"status": "KO", "error": "<message>"}`, with a matching HTTP status, so
/// the client can surface the message verbatim.
///
/// # Example
///
/// ```
/// use pintxopote_api::error::{ApiError, ApiResult};
///
/// fn find(found: bool) -> ApiResult<()> {
///     if !found {
///         return Err(ApiError::NotFound("pub with id 42 does not exist".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(find(false).is_err());
/// ```

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pintxopote_shared::{
    auth::{jwt::JwtError, middleware::AuthError, password::PasswordError},
    envelope::Envelope,
    models::user::RoleError,
    validation::FieldError,
};

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad request (400), including field validation failures
    #[error("{0}")]
    BadRequest(String),

    /// Unauthorized (401), e.g. wrong credentials or a bad token
    #[error("{0}")]
    Unauthorized(String),

    /// Forbidden (403)
    #[error("{0}")]
    Forbidden(String),

    /// Not found (404)
    #[error("{0}")]
    NotFound(String),

    /// Conflict (409), e.g. duplicate email
    #[error("{0}")]
    Conflict(String),

    /// Internal server error (500); the detail is logged, not returned
    #[error("{0}")]
    InternalError(String),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match self {
            ApiError::InternalError(detail) => {
                tracing::error!("Internal error: {}", detail);
                "internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(Envelope::<()>::ko(message))).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("resource not found".to_string()),
            other => ApiError::InternalError(format!("Database error: {}", other)),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<FieldError> for ApiError {
    fn from(err: FieldError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<RoleError> for ApiError {
    fn from(err: RoleError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Unauthorized(err.to_string())
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::CreateError(detail) => ApiError::InternalError(detail),
            other => AuthError::from(other).into(),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::InternalError(format!("Password operation failed: {}", err))
    }
}
