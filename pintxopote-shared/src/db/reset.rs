/// Collection resets
///
/// Wipes every table so each end-to-end test starts from an empty store.
/// Never call this against a database holding real data.

use sqlx::PgPool;
use tracing::warn;

/// Tables in dependency order, children first
pub const TABLES: [&str; 4] = ["orders", "pintxopotes", "pubs", "users"];

/// Truncates every table
///
/// # Errors
///
/// Returns an error if database connection fails
pub async fn clear_all(pool: &PgPool) -> Result<(), sqlx::Error> {
    warn!(tables = ?TABLES, "Truncating all tables");

    sqlx::query(&format!("TRUNCATE {} CASCADE", TABLES.join(", ")))
        .execute(pool)
        .await?;

    Ok(())
}
