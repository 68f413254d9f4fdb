/// User endpoints
///
/// # Endpoints
///
/// - `POST /users` - Register (public)
/// - `GET /users/:id` - Retrieve own profile (bearer token)
/// - `PUT /users/:id` - Update own profile (bearer token)

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};
use pintxopote_shared::{
    auth::{middleware::AuthContext, password},
    envelope::Envelope,
    models::user::{CreateUser, Role, UpdateUser, User, UserProfile},
    requests::{ProfileUpdate, RegisterUser},
};
use tracing::info;

use super::{
    conflict_on_email, email_taken, ensure_owner, ok, parse_id, user_not_found, Reply,
    ReplyWithStatus,
};
use crate::{app::AppState, error::ApiResult};

/// Registers a new user
///
/// # Endpoint
///
/// ```text
/// POST /users
/// Content-Type: application/json
///
/// {
///   "name": "John",
///   "surname": "Doe",
///   "email": "jd@mail.com",
///   "password": "123",
///   "role": "pub",
///   "address": { "street": "Calle Bilbao", "city": "Bilbo", "postalCode": "48005", "country": "España" }
/// }
/// ```
///
/// `role` and `address` are optional; role defaults to `user`.
///
/// # Response
///
/// `201 Created` with `{ "status": "OK" }`
///
/// # Errors
///
/// - `400 Bad Request`: Missing or blank field, or unknown role
/// - `409 Conflict`: Email already registered
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterUser>, JsonRejection>,
) -> ApiResult<ReplyWithStatus<()>> {
    let Json(body) = payload?;
    let registration = body.validate()?;

    let role = match registration.role {
        Some(role) => vec![role.parse::<Role>()?],
        None => vec![Role::User],
    };

    if User::find_by_email(&state.db, registration.email).await?.is_some() {
        return Err(email_taken(registration.email));
    }

    let password_hash = password::hash_password(registration.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            name: registration.name.to_string(),
            surname: registration.surname.to_string(),
            email: registration.email.to_string(),
            password_hash,
            role,
            address: registration.address,
        },
    )
    .await
    .map_err(|e| conflict_on_email(e, registration.email))?;

    info!(user_id = %user.id, "User registered");

    Ok((StatusCode::CREATED, Json(Envelope::ok_empty())))
}

/// Retrieves the caller's profile
///
/// # Response
///
/// ```json
/// {
///   "status": "OK",
///   "data": { "id": "uuid", "name": "John", "surname": "Doe", "email": "jd@mail.com", "role": ["user"] }
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
/// - `403 Forbidden`: Token issued to another user
/// - `404 Not Found`: No such user
pub async fn retrieve(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(raw_id): Path<String>,
) -> ApiResult<Reply<UserProfile>> {
    let id = parse_id(&raw_id, || user_not_found(&raw_id))?;
    ensure_owner(&auth, id)?;

    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| user_not_found(&raw_id))?;

    Ok(ok(user.into()))
}

/// Updates the caller's profile
///
/// # Endpoint
///
/// ```text
/// PUT /users/:id
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// { "name": "Juan", "surname": "Wayne", "email": "jd@mail.com", "newEmail": "jw@mail.com" }
/// ```
///
/// `newEmail`, `password` and `address` are optional. A submitted address
/// replaces the stored one.
///
/// # Errors
///
/// - `400 Bad Request`: Missing or blank field
/// - `401 Unauthorized`: Missing or invalid token
/// - `403 Forbidden`: Token issued to another user
/// - `404 Not Found`: No such user
/// - `409 Conflict`: New email belongs to another user
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(raw_id): Path<String>,
    payload: Result<Json<ProfileUpdate>, JsonRejection>,
) -> ApiResult<Reply<()>> {
    let id = parse_id(&raw_id, || user_not_found(&raw_id))?;
    ensure_owner(&auth, id)?;

    let Json(body) = payload?;
    let changes = body.validate_changes()?;

    let current = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| user_not_found(&raw_id))?;

    let email = changes.new_email.unwrap_or(changes.email);
    if email != current.email {
        if let Some(other) = User::find_by_email(&state.db, email).await? {
            if other.id != id {
                return Err(email_taken(email));
            }
        }
    }

    let password_hash = changes.password.map(password::hash_password).transpose()?;

    User::update(
        &state.db,
        id,
        UpdateUser {
            name: Some(changes.name.to_string()),
            surname: Some(changes.surname.to_string()),
            email: Some(email.to_string()),
            password_hash,
            address: changes.address,
        },
    )
    .await
    .map_err(|e| conflict_on_email(e, email))?
    .ok_or_else(|| user_not_found(&raw_id))?;

    info!(user_id = %id, "User updated");

    Ok(Json(Envelope::ok_empty()))
}
