/// Schema migrations
///
/// The SQL lives in the workspace-level `migrations/` directory as
/// reversible `{version}_{name}.up.sql` / `.down.sql` pairs and is embedded
/// into the binary at compile time.
///
/// # Example
///
/// ```no_run
/// use devconnector_shared::db::migrations::{migration_status, run_migrations};
/// use devconnector_shared::db::pool::{create_pool, PoolConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(&PoolConfig::new(std::env::var("DATABASE_URL")?)).await?;
///
/// run_migrations(&pool).await?;
///
/// let status = migration_status(&pool).await?;
/// println!("Applied {} migrations", status.applied_migrations);
/// # Ok(())
/// # }
/// ```

use sqlx::{migrate::Migrator, postgres::PgPool};
use tracing::{debug, info, warn};

/// Migrations embedded from `migrations/`
pub static MIGRATOR: Migrator = sqlx::migrate!("../migrations");

/// Migration status information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    /// Number of migrations that have been applied
    pub applied_migrations: usize,

    /// Latest applied migration version
    pub latest_version: Option<i64>,

    /// Whether every embedded migration has been applied
    pub is_up_to_date: bool,
}

/// Applies all pending migrations
///
/// # Errors
///
/// Returns an error if a migration fails or a previously applied migration
/// was modified.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!(
        embedded = MIGRATOR.iter().filter(|m| m.migration_type.is_up_migration()).count(),
        "Running database migrations"
    );

    match MIGRATOR.run(pool).await {
        Ok(()) => {
            info!("Database migrations completed");
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "Migration failed");
            Err(e)
        }
    }
}

/// Reports which migrations have been applied
pub async fn migration_status(pool: &PgPool) -> Result<MigrationStatus, sqlx::Error> {
    let table_exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (
            SELECT FROM information_schema.tables
            WHERE table_schema = current_schema()
            AND table_name = '_sqlx_migrations'
        )",
    )
    .fetch_one(pool)
    .await?;

    if !table_exists {
        debug!("Migrations table does not exist yet");
        return Ok(MigrationStatus {
            applied_migrations: 0,
            latest_version: None,
            is_up_to_date: false,
        });
    }

    let (count, latest_version): (i64, Option<i64>) = sqlx::query_as(
        "SELECT COUNT(*), MAX(version) FROM _sqlx_migrations WHERE success = true",
    )
    .fetch_one(pool)
    .await?;

    let newest_embedded = MIGRATOR
        .iter()
        .filter(|m| m.migration_type.is_up_migration())
        .map(|m| m.version)
        .max();

    Ok(MigrationStatus {
        applied_migrations: count as usize,
        latest_version,
        is_up_to_date: latest_version == newest_embedded,
    })
}
