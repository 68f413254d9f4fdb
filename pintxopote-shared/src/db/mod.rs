/// Database layer for Pintxopote
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool with a startup health check
/// - `migrations`: Embedded schema migrations
/// - `reset`: Table truncation for test isolation
/// - Models are in the `models` module at crate root level

pub mod migrations;
pub mod pool;
pub mod reset;
