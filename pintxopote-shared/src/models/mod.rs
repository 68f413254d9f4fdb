/// Database models for Pintxopote
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: User accounts, roles and the public profile projection
/// - `address`: Postal addresses embedded in users and pubs
/// - `venue`: Pubs and their pintxopote references
/// - `pintxopote`: Daily deals and their scores
/// - `order`: Customer orders on pintxopotes
///
/// # Example
///
/// ```no_run
/// use pintxopote_shared::models::venue::{CreatePub, Pub};
/// use pintxopote_shared::models::address::PubAddress;
/// use pintxopote_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let venue = Pub::create(&pool, CreatePub {
///     name: "Bar Haizea".to_string(),
///     image: None,
///     address: PubAddress {
///         street: "Somera".to_string(),
///         city: "Bilbo".to_string(),
///         lat: None,
///         long: None,
///     },
///     desc: None,
/// }).await?;
/// # Ok(())
/// # }
/// ```

pub mod address;
pub mod order;
pub mod pintxopote;
pub mod user;
pub mod venue;
