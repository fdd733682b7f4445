//! Database connection pool management.

use async_trait::async_trait;
use shaku::Component;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::ConnectOptions;
use std::str::FromStr;
use tracing::{info, warn};
use userdir_config::DatabaseConfig;
use userdir_core::{Interface, UserDirError, UserDirResult};

/// Schema applied at startup. Every statement is idempotent.
const SCHEMA: &str = include_str!("../sql/schema.sql");

/// Interface for database pool operations.
#[async_trait]
pub trait DatabasePoolInterface: Interface + Send + Sync {
    /// Returns a reference to the underlying SQLite pool.
    fn inner(&self) -> &SqlitePool;

    /// Checks if the database connection is healthy.
    async fn health_check(&self) -> UserDirResult<()>;

    /// Creates the users table if it does not exist yet.
    async fn ensure_schema(&self) -> UserDirResult<()>;

    /// Closes the database pool.
    async fn close(&self);
}

/// Database pool wrapper.
#[derive(Component, Clone)]
#[shaku(interface = DatabasePoolInterface)]
pub struct DatabasePool {
    pool: SqlitePool,
}

impl DatabasePool {
    /// Opens a pool from configuration, creating the database file if needed.
    ///
    /// In-memory databases are private to a single connection, so the pool is
    /// capped at one connection that is never recycled.
    pub async fn connect(config: &DatabaseConfig) -> UserDirResult<Self> {
        info!("Connecting to SQLite database at {}", config.url);

        let mut options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| UserDirError::Configuration(format!("Invalid database URL: {}", e)))?
            .create_if_missing(true);
        if !config.log_queries {
            options = options.disable_statement_logging();
        }

        let mut pool_options = SqlitePoolOptions::new().acquire_timeout(config.connect_timeout());
        pool_options = if config.is_in_memory() {
            pool_options
                .min_connections(1)
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            pool_options
                .min_connections(config.min_connections)
                .max_connections(config.max_connections)
                .idle_timeout(Some(config.idle_timeout()))
        };

        let pool = pool_options.connect_with(options).await.map_err(|e| {
            warn!("Failed to connect to database: {}", e);
            UserDirError::Database(format!("Failed to connect: {}", e))
        })?;

        info!("SQLite connection pool established");
        Ok(Self { pool })
    }

    /// Wraps a pre-existing pool (for Shaku injection).
    #[must_use]
    pub fn with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DatabasePoolInterface for DatabasePool {
    fn inner(&self) -> &SqlitePool {
        &self.pool
    }

    async fn health_check(&self) -> UserDirResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| UserDirError::Database(format!("Health check failed: {}", e)))?;
        Ok(())
    }

    async fn ensure_schema(&self) -> UserDirResult<()> {
        info!("Ensuring database schema...");
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| UserDirError::Database(format!("Schema setup failed: {}", e)))?;
        info!("Database schema ready");
        Ok(())
    }

    async fn close(&self) {
        info!("Closing database connection pool...");
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}

impl std::fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabasePool")
            .field("size", &self.pool.size())
            .field("num_idle", &self.pool.num_idle())
            .finish()
    }
}
