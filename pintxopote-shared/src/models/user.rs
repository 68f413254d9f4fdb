/// User model and database operations
///
/// This module provides the User model and the operations the API needs to
/// register, authenticate, retrieve and update accounts.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE user_role AS ENUM ('user', 'pub');
///
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name TEXT NOT NULL,
///     surname TEXT NOT NULL,
///     email TEXT NOT NULL UNIQUE,
///     password_hash TEXT NOT NULL,
///     role user_role[] NOT NULL DEFAULT ARRAY['user']::user_role[],
///     address JSONB,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use pintxopote_shared::models::user::{CreateUser, Role, User};
/// use pintxopote_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(&pool, CreateUser {
///     name: "John".to_string(),
///     surname: "Doe".to_string(),
///     email: "jd@mail.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
///     role: vec![Role::User],
///     address: None,
/// }).await?;
///
/// let found = User::find_by_email(&pool, "jd@mail.com").await?;
/// assert_eq!(found.map(|u| u.id), Some(user.id));
/// # Ok(())
/// # }
/// ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgHasArrayType, PgTypeInfo};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::address::UserAddress;

/// Account role
///
/// Regular customers are `user`; venue owners are `pub`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Customer placing orders
    User,

    /// Venue owner publishing pintxopotes
    Pub,
}

impl Role {
    /// Converts role to its stored string form
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Pub => "pub",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected role value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("User validation failed: role.0: `{0}` is not a valid enum value for path `role`.")]
pub struct RoleError(pub String);

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "pub" => Ok(Role::Pub),
            other => Err(RoleError(other.to_string())),
        }
    }
}

impl PgHasArrayType for Role {
    fn array_type_info() -> PgTypeInfo {
        PgTypeInfo::with_name("_user_role")
    }
}

/// User model representing an account
///
/// Passwords are stored as Argon2id hashes, never in plaintext, and the hash
/// is never serialized.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Unique user ID
    pub id: Uuid,

    /// First name
    pub name: String,

    /// Last name
    pub surname: String,

    /// Email address, unique across all users
    pub email: String,

    /// Argon2id password hash
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Roles granted to the account
    pub role: Vec<Role>,

    /// Optional postal address
    pub address: Option<UserAddress>,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last updated
    pub updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    surname: String,
    email: String,
    password_hash: String,
    role: Vec<Role>,
    address: Option<Json<UserAddress>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            surname: row.surname,
            email: row.email,
            password_hash: row.password_hash,
            role: row.role,
            address: row.address.map(|Json(address)| address),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Public projection of a user, as returned by `GET /users/:id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// User ID
    pub id: Uuid,

    /// First name
    pub name: String,

    /// Last name
    pub surname: String,

    /// Email address
    pub email: String,

    /// Roles granted to the account
    pub role: Vec<Role>,

    /// Postal address, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<UserAddress>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            surname: user.surname,
            email: user.email,
            role: user.role,
            address: user.address,
        }
    }
}

/// Result of a successful `POST /auth`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Authenticated user
    pub id: Uuid,

    /// Roles granted to the account
    pub role: Vec<Role>,

    /// Bearer token for later calls
    pub token: String,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// First name
    pub name: String,

    /// Last name
    pub surname: String,

    /// Email address
    pub email: String,

    /// Argon2id password hash (NOT plaintext password!)
    pub password_hash: String,

    /// Roles; an empty list falls back to `[user]`
    pub role: Vec<Role>,

    /// Optional postal address
    pub address: Option<UserAddress>,
}

/// Input for updating an existing user
///
/// All fields are optional. Only non-None fields will be updated; a new
/// address replaces the stored one wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    /// New first name
    pub name: Option<String>,

    /// New last name
    pub surname: Option<String>,

    /// New email address
    pub email: Option<String>,

    /// New password hash
    pub password_hash: Option<String>,

    /// New address
    pub address: Option<UserAddress>,
}

const USER_COLUMNS: &str =
    "id, name, surname, email, password_hash, role, address, created_at, updated_at";

impl User {
    /// Creates a new user in the database
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Email already exists (unique constraint violation)
    /// - Database connection fails
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let role = if data.role.is_empty() {
            vec![Role::User]
        } else {
            data.role
        };

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (name, surname, email, password_hash, role, address)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(data.name)
        .bind(data.surname)
        .bind(data.email)
        .bind(data.password_hash)
        .bind(role)
        .bind(data.address.map(Json))
        .fetch_one(pool)
        .await?;

        Ok(row.into())
    }

    /// Finds a user by ID
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Finds a user by email address (exact match)
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Updates an existing user
    ///
    /// Only non-None fields in `data` will be updated. The `updated_at`
    /// timestamp is always refreshed.
    ///
    /// # Returns
    ///
    /// The updated user if found, None if the user doesn't exist
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Email already exists for another user
    /// - Database connection fails
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateUser,
    ) -> Result<Option<Self>, sqlx::Error> {
        // Build dynamic update query based on which fields are present
        let mut query = String::from("UPDATE users SET updated_at = NOW()");
        let mut bind_count = 1;

        for (column, present) in [
            ("name", data.name.is_some()),
            ("surname", data.surname.is_some()),
            ("email", data.email.is_some()),
            ("password_hash", data.password_hash.is_some()),
            ("address", data.address.is_some()),
        ] {
            if present {
                bind_count += 1;
                query.push_str(&format!(", {column} = ${bind_count}"));
            }
        }

        query.push_str(&format!(" WHERE id = $1 RETURNING {USER_COLUMNS}"));

        // Binds must follow the same order as the columns above
        let mut q = sqlx::query_as::<_, UserRow>(&query).bind(id);

        if let Some(name) = data.name {
            q = q.bind(name);
        }
        if let Some(surname) = data.surname {
            q = q.bind(surname);
        }
        if let Some(email) = data.email {
            q = q.bind(email);
        }
        if let Some(password_hash) = data.password_hash {
            q = q.bind(password_hash);
        }
        if let Some(address) = data.address {
            q = q.bind(Json(address));
        }

        let row = q.fetch_optional(pool).await?;

        Ok(row.map(Into::into))
    }
}
