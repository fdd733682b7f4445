//! Common test infrastructure for database integration tests.

use std::sync::Arc;
use userdir_config::DatabaseConfig;
use userdir_core::NewUser;
use userdir_repository::{DatabasePool, DatabasePoolInterface};

/// Private in-memory database with the schema applied.
pub struct TestDatabase {
    pool: Arc<DatabasePool>,
}

impl TestDatabase {
    /// Creates a fresh in-memory database.
    pub async fn new() -> Self {
        let pool = DatabasePool::connect(&DatabaseConfig::in_memory())
            .await
            .expect("Failed to open in-memory database");

        pool.ensure_schema().await.expect("Failed to create schema");

        Self {
            pool: Arc::new(pool),
        }
    }

    /// Returns the pool as the injected interface.
    pub fn pool(&self) -> Arc<dyn DatabasePoolInterface> {
        self.pool.clone()
    }
}

/// Builds a new user with the given username and email.
pub fn new_user(username: &str, email: &str) -> NewUser {
    NewUser::new(username, email, "testtest")
}
