//! # User Directory Server
//!
//! Main entry point: loads configuration, initializes logging, wires the
//! application and serves until SIGINT/SIGTERM.

use tokio::signal;
use tracing::{error, info};
use userdir_config::ConfigLoader;
use userdir_core::{init_logging, LogFormat, UserDirResult};
use userdir_server::{app::Application, startup};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> UserDirResult<()> {
    let config = match ConfigLoader::from_default_location() {
        Ok(loader) => loader.into_config(),
        Err(e) => {
            init_logging("info", LogFormat::Pretty);
            return Err(e);
        }
    };

    init_logging(&config.observability.log_level, config.observability.format());

    startup::print_banner();
    info!("Starting {} v{}", config.app.name, config.app.version);
    startup::print_startup_info(&config);

    let app = Application::build(config).await?;
    app.serve(shutdown_signal()).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
