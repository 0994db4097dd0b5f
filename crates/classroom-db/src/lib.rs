//! # Classroom DB
//!
//! PostgreSQL connection pool and schema migrations for the Classroom API.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default: 10)
//!
//! # Example
//!
//! ```ignore
//! use classroom_db::{init_db_pool, run_migrations};
//!
//! let pool = init_db_pool().await?;
//! run_migrations(&pool).await?;
//! ```

use std::env;

use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

pub use sqlx::PgPool;

/// Errors raised while bringing the database up.
#[derive(Debug)]
pub enum DbInitError {
    MissingUrl,
    Connect(sqlx::Error),
    Migrate(MigrateError),
}

impl std::fmt::Display for DbInitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DbInitError::MissingUrl => write!(f, "DATABASE_URL must be set"),
            DbInitError::Connect(e) => write!(f, "failed to connect to database: {}", e),
            DbInitError::Migrate(e) => write!(f, "failed to run migrations: {}", e),
        }
    }
}

impl std::error::Error for DbInitError {}

/// Initializes a PostgreSQL connection pool from `DATABASE_URL`.
///
/// The returned pool is cheaply cloneable and is shared through the
/// application state.
pub async fn init_db_pool() -> Result<PgPool, DbInitError> {
    let database_url = env::var("DATABASE_URL").map_err(|_| DbInitError::MissingUrl)?;
    let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(&database_url)
        .await
        .map_err(DbInitError::Connect)?;

    info!(max_connections, "Database pool initialized");
    Ok(pool)
}

/// Applies the embedded migrations from the workspace `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbInitError> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(DbInitError::Migrate)?;

    info!("Database migrations applied");
    Ok(())
}
