//! Dependency injection module using Shaku.

use std::sync::Arc;
use tracing::info;
use userdir_config::DatabaseConfig;
use userdir_core::{module, HasComponent, UserDirResult};
use userdir_repository::{DatabasePool, DatabasePoolInterface, DatabasePoolParameters, SqliteUserRepository};
use userdir_service::UserServiceComponent;

// Single-process module: SQLite pool, repository and user service.
module! {
    pub AppModule {
        components = [
            DatabasePool,
            SqliteUserRepository,
            UserServiceComponent,
        ],
        providers = [],
    }
}

/// Opens the database, ensures the schema and builds the module.
pub async fn build_app_module(db_config: &DatabaseConfig) -> UserDirResult<Arc<AppModule>> {
    let db_pool = DatabasePool::connect(db_config).await?;
    db_pool.ensure_schema().await?;

    let module = AppModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePoolParameters {
            pool: db_pool.inner().clone(),
        })
        .build();

    info!("Dependency injection module built");
    Ok(Arc::new(module))
}

/// Resolves the storage pool from a module.
pub trait DatabaseResolver {
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface>;
}

impl DatabaseResolver for AppModule {
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface> {
        self.resolve()
    }
}
