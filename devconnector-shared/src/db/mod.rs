/// Database layer
///
/// - `pool`: PostgreSQL connection pool with health checks
/// - `migrations`: Embedded schema migrations
///
/// Models live in the `models` module at crate root level.

pub mod migrations;
pub mod pool;
