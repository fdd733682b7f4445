//! Server startup utilities.

use tracing::info;
use userdir_config::AppConfig;

/// Prints the startup banner.
pub fn print_banner() {
    info!(
        r#"
  _   _               ____  _
 | | | |___  ___ _ __|  _ \(_)_ __
 | | | / __|/ _ \ '__| | | | | '__|
 | |_| \__ \  __/ |  | |_| | | |
  \___/|___/\___|_|  |____/|_|_|
    "#
    );
}

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    let addr = config.server.addr();
    info!("{}", separator);
    info!("Environment: {}", config.app.environment);
    info!("Database:    {}", config.database.url);
    info!("REST API:    http://{}", addr);
    info!("Health:      http://{}/health", addr);
    info!("API Docs:    http://{}/swagger-ui", addr);
    info!("{}", separator);
}
