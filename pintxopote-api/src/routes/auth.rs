/// Authentication endpoint
///
/// # Endpoints
///
/// - `POST /auth` - Exchange email and password for a bearer token

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use pintxopote_shared::{
    auth::{jwt, password},
    models::user::{AuthSession, User},
    requests::Credentials,
};
use tracing::{debug, info};

use super::{ok, Reply};
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};

fn wrong_credentials() -> ApiError {
    ApiError::Unauthorized("wrong credentials".to_string())
}

/// Authenticates a user
///
/// # Endpoint
///
/// ```text
/// POST /auth
/// Content-Type: application/json
///
/// { "email": "jd@mail.com", "password": "123" }
/// ```
///
/// # Response
///
/// ```json
/// { "status": "OK", "data": { "id": "uuid", "role": ["user"], "token": "eyJ..." } }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing or blank email/password
/// - `401 Unauthorized`: Unknown email or wrong password (same message for both)
pub async fn authenticate(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> ApiResult<Reply<AuthSession>> {
    let Json(credentials) = payload?;
    let (email, password) = credentials.validate()?;

    let Some(user) = User::find_by_email(&state.db, email).await? else {
        debug!(email, "Authentication for unknown email");
        return Err(wrong_credentials());
    };

    if !password::verify_password(password, &user.password_hash)? {
        debug!(user_id = %user.id, "Authentication with wrong password");
        return Err(wrong_credentials());
    }

    let claims = jwt::Claims::new(user.id, user.role.clone());
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    info!(user_id = %user.id, "User authenticated");

    Ok(ok(AuthSession {
        id: user.id,
        role: user.role,
        token,
    }))
}
