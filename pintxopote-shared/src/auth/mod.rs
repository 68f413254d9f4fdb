/// Authentication utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: JWT token generation and validation
/// - [`middleware`]: Axum bearer-token middleware and [`middleware::AuthContext`]
///
/// # Example
///
/// ```no_run
/// use pintxopote_shared::auth::password::{hash_password, verify_password};
/// use pintxopote_shared::auth::jwt::{create_token, Claims};
/// use pintxopote_shared::models::user::Role;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("123")?;
/// assert!(verify_password("123", &hash)?);
///
/// let claims = Claims::new(Uuid::new_v4(), vec![Role::User]);
/// let token = create_token(&claims, "secret-key-at-least-32-bytes-long!!")?;
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod middleware;
pub mod password;
