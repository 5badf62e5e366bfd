//! Application configuration schemas.
//!
//! Configuration is deserialized from TOML files via the `config` crate
//! and overlaid with `HOOKRUNNER__*` environment variables. Every section
//! has defaults, so an empty environment still yields a usable config.

pub mod logging;
pub mod runner;

use std::collections::BTreeMap;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub use self::logging::LoggingConfig;
pub use self::runner::RunnerConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Hook runner settings.
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Per-plugin settings keyed by plugin id, e.g. `[plugins.workspace-guard]`.
    #[serde(default)]
    pub plugins: BTreeMap<String, serde_json::Value>,
}

impl AppConfig {
    /// Load configuration from `config/default`, `config/{env}` and the
    /// environment.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from(Path::new("config"), env)
    }

    /// Load configuration from the given directory.
    ///
    /// Both `default` and `{env}` files are optional; environment variables
    /// prefixed with `HOOKRUNNER` and separated by `__` win over files.
    pub fn load_from(dir: &Path, env: &str) -> Result<Self, AppError> {
        let default_path = dir.join("default");
        let env_path = dir.join(env);

        let config = config::Config::builder()
            .add_source(config::File::with_name(&default_path.to_string_lossy()).required(false))
            .add_source(config::File::with_name(&env_path.to_string_lossy()).required(false))
            .add_source(
                config::Environment::with_prefix("HOOKRUNNER")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("runner.disabled_plugins")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Deserialize the settings section of plugin `id`.
    ///
    /// A missing section yields `T::default()`.
    pub fn plugin_settings<T>(&self, id: &str) -> Result<T, AppError>
    where
        T: DeserializeOwned + Default,
    {
        match self.plugins.get(id) {
            Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
                AppError::configuration(format!("Invalid settings for plugin '{id}': {e}"))
            }),
            None => Ok(T::default()),
        }
    }
}
