//! Configuration loader with layered sources.

use crate::{format_validation_errors, AppConfig, ConfigValidator};
use config::{Config, ConfigError, Environment, File};
use std::path::Path;
use tracing::{debug, info, warn};
use userdir_core::UserDirError;

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "USERDIR";

/// Configuration loader with layered sources.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `{config_dir}/default.toml` - Default values
    /// 2. `{config_dir}/{environment}.toml` - Environment-specific overrides
    /// 3. `{config_dir}/local.toml` - Local overrides
    /// 4. Environment variables with `USERDIR_` prefix and `__` separator
    ///    (e.g. `USERDIR_DATABASE__URL`)
    pub fn new(config_dir: impl AsRef<str>) -> Result<Self, UserDirError> {
        let config = Self::load_config(config_dir.as_ref())?;
        Ok(Self { config })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, UserDirError> {
        Self::new("./config")
    }

    /// Consumes the loader, returning the configuration.
    #[must_use]
    pub fn into_config(self) -> AppConfig {
        self.config
    }

    fn load_config(config_dir: &str) -> Result<AppConfig, UserDirError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment_override = std::env::var("USERDIR_ENVIRONMENT").ok();
        let environment = environment_override
            .clone()
            .unwrap_or_else(|| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{}/{}.toml", config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_error_to_userdir_error)?;

        let mut app_config: AppConfig = config
            .try_deserialize()
            .map_err(config_error_to_userdir_error)?;

        if let Some(environment) = environment_override {
            app_config.app.environment = environment;
        }

        ConfigValidator::validate(&app_config).map_err(|errors| {
            let message = format_validation_errors(&errors);
            warn!("{}", message);
            UserDirError::Configuration(message)
        })?;

        Ok(app_config)
    }
}

fn config_error_to_userdir_error(err: ConfigError) -> UserDirError {
    UserDirError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn dir_path(dir: &tempfile::TempDir) -> String {
        dir.path().to_string_lossy().into_owned()
    }

    #[test]
    fn test_load_without_files_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigLoader::new(dir_path(&dir)).unwrap().into_config();

        assert_eq!(config.server.port, 8000);
        assert_eq!(config.database.url, "sqlite://userdir.db");
    }

    #[test]
    fn test_default_file_overrides() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[server]\nport = 9100\n\n[database]\nurl = \"sqlite::memory:\"\nmax_connections = 1\n",
        )
        .unwrap();

        let config = ConfigLoader::new(dir_path(&dir)).unwrap().into_config();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(config.database.is_in_memory());
    }

    #[test]
    fn test_local_file_wins_over_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), "[server]\nport = 9100\n").unwrap();
        fs::write(dir.path().join("local.toml"), "[server]\nport = 9200\n").unwrap();

        let config = ConfigLoader::new(dir_path(&dir)).unwrap().into_config();
        assert_eq!(config.server.port, 9200);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), "[server]\nport = 0\n").unwrap();

        let err = ConfigLoader::new(dir_path(&dir)).err().unwrap();
        assert!(matches!(err, UserDirError::Configuration(_)));
    }

    #[test]
    fn test_malformed_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), "[server\nport = ").unwrap();

        let err = ConfigLoader::new(dir_path(&dir)).err().unwrap();
        assert!(matches!(err, UserDirError::Configuration(_)));
    }
}
