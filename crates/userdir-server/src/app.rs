//! Application assembly and serving.

use crate::di::{build_app_module, AppModule, DatabaseResolver};
use axum::Router;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use userdir_config::AppConfig;
use userdir_core::{UserDirError, UserDirResult};
use userdir_rest::create_router;

/// A fully wired application, ready to serve.
pub struct Application {
    config: AppConfig,
    module: Arc<AppModule>,
    router: Router,
}

impl Application {
    /// Opens storage, builds the DI module and the router.
    pub async fn build(config: AppConfig) -> UserDirResult<Self> {
        let module = build_app_module(&config.database).await?;
        let router = create_router(module.as_ref(), &config.server);

        Ok(Self {
            config,
            module,
            router,
        })
    }

    /// Returns the configuration the application was built with.
    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns a handle to the router.
    #[must_use]
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Binds the configured address and serves until `shutdown` resolves,
    /// then closes the database pool.
    pub async fn serve<F>(self, shutdown: F) -> UserDirResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.server.addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| UserDirError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

        info!("Starting REST server on http://{}", addr);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| UserDirError::Internal(format!("REST server error: {}", e)))?;

        self.module.database_pool().close().await;
        info!("Server shutdown complete");
        Ok(())
    }
}
