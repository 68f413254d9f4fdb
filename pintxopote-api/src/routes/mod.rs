/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Token issuing (`POST /auth`)
/// - `users`: Registration, profile retrieval and update
/// - `pintxopotes`: City listings and single deals
/// - `pubs`: Pub details
/// - `orders`: Placing and listing orders
///
/// Every handler answers with the `{status, data | error}` envelope.

use axum::{http::StatusCode, Json};
use pintxopote_shared::{auth::middleware::AuthContext, envelope::Envelope};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

pub mod auth;
pub mod health;
pub mod orders;
pub mod pintxopotes;
pub mod pubs;
pub mod users;

/// Successful JSON reply
pub type Reply<T> = Json<Envelope<T>>;

/// Successful JSON reply with an explicit status
pub type ReplyWithStatus<T> = (StatusCode, Json<Envelope<T>>);

pub(crate) fn ok<T>(data: T) -> Reply<T> {
    Json(Envelope::ok(data))
}

pub(crate) fn created<T>(data: T) -> ReplyWithStatus<T> {
    (StatusCode::CREATED, Json(Envelope::ok(data)))
}

/// Parses a record ID, treating anything malformed as an unknown record
pub(crate) fn parse_id(raw: &str, not_found: impl FnOnce() -> ApiError) -> ApiResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| not_found())
}

/// Rejects requests acting on another user's data
pub(crate) fn ensure_owner(auth: &AuthContext, user_id: Uuid) -> ApiResult<()> {
    if auth.is_user(user_id) {
        Ok(())
    } else {
        tracing::warn!(token_user = %auth.user_id, %user_id, "Token does not match user");
        Err(ApiError::Forbidden("user id does not match token".to_string()))
    }
}

pub(crate) fn user_not_found(id: impl std::fmt::Display) -> ApiError {
    ApiError::NotFound(format!("user with id {id} does not exist"))
}

pub(crate) fn email_taken(email: &str) -> ApiError {
    ApiError::Conflict(format!("user with email {email} already exists"))
}

/// Maps a unique-constraint failure to the duplicate-email conflict
pub(crate) fn conflict_on_email(err: sqlx::Error, email: &str) -> ApiError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => email_taken(email),
        _ => err.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string(), || user_not_found(id)).unwrap(), id);

        let err = parse_id("123456781234567812345678", || user_not_found("123456781234567812345678"))
            .unwrap_err();
        assert_eq!(err.to_string(), "user with id 123456781234567812345678 does not exist");
    }

    #[test]
    fn test_ensure_owner() {
        let user_id = Uuid::new_v4();
        let auth = AuthContext { user_id };

        assert!(ensure_owner(&auth, user_id).is_ok());

        let err = ensure_owner(&auth, Uuid::new_v4()).unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
        assert_eq!(err.to_string(), "user id does not match token");
    }

    #[test]
    fn test_conflict_on_email_passes_other_errors_through() {
        let err = conflict_on_email(sqlx::Error::PoolTimedOut, "jd@mail.com");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
