/// Order model and database operations
///
/// An order is a customer's claim on a number of units of a pintxopote.
/// It starts unvalidated; the pub validates it when the customer collects.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE orders (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     pintxopote_id UUID NOT NULL REFERENCES pintxopotes(id) ON DELETE CASCADE,
///     quantity INTEGER NOT NULL CHECK (quantity > 0),
///     validated BOOLEAN NOT NULL DEFAULT FALSE,
///     date TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Order record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: Uuid,

    /// Customer who placed the order
    #[serde(rename = "user")]
    pub user_id: Uuid,

    /// Ordered pintxopote
    #[serde(rename = "pintxopote")]
    pub pintxopote_id: Uuid,

    pub quantity: i32,

    /// Set once the pub has served the order
    pub validated: bool,

    /// When the order was placed
    pub date: DateTime<Utc>,
}

/// Input for creating an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrder {
    pub user_id: Uuid,
    pub pintxopote_id: Uuid,
    pub quantity: i32,
}

const ORDER_COLUMNS: &str = "id, user_id, pintxopote_id, quantity, validated, date";

impl Order {
    /// Places a new, unvalidated order
    ///
    /// # Errors
    ///
    /// Returns an error if the user or pintxopote doesn't exist, or if the
    /// database connection fails
    pub async fn create(pool: &PgPool, data: CreateOrder) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Order>(&format!(
            r#"
            INSERT INTO orders (user_id, pintxopote_id, quantity)
            VALUES ($1, $2, $3)
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(data.user_id)
        .bind(data.pintxopote_id)
        .bind(data.quantity)
        .fetch_one(pool)
        .await
    }

    /// Lists a user's orders, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY date DESC"
        ))
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
