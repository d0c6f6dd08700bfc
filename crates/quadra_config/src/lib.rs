use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use tracing::warn;

pub mod env_vars;
pub mod models;

pub use models::*;

/// Loads the application configuration.
///
/// Sources, later ones winning: built-in defaults, `config/default.*`,
/// `config/{RUN_ENV}.*`, `QUADRA__*` environment variables. The directory can
/// be moved with `CONFIG_DIR`. `"secret_from_env"` markers are resolved last.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let config_dir =
        PathBuf::from(env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string()));

    let raw_config = build_config(&config_dir, &run_env, None)?;
    apply_env_overrides_from_marker(raw_config)
}

/// Builds the layered configuration without touching secrets.
///
/// `env_source` replaces the process environment when set.
pub fn build_config(
    config_dir: &Path,
    run_env: &str,
    env_source: Option<HashMap<String, String>>,
) -> Result<AppConfig, ConfigError> {
    let prefix = env_vars::get_config_prefix();
    let default_path = config_dir.join("default");
    let env_path = config_dir.join(run_env);

    let builder = Config::builder()
        .add_source(File::from(default_path.as_path()).required(false))
        .add_source(File::from(env_path.as_path()).required(false))
        .add_source(
            Environment::with_prefix(&prefix)
                .prefix_separator(env_vars::CONFIG_SEPARATOR)
                .separator(env_vars::CONFIG_SEPARATOR)
                .try_parsing(true)
                .source(env_source),
        );

    builder.build()?.try_deserialize()
}

/// Replaces all "secret_from_env" values with environment variable values.
pub fn apply_env_overrides_from_marker(config: AppConfig) -> Result<AppConfig, ConfigError> {
    let mut json = serde_json::to_value(&config)
        .map_err(|err| ConfigError::Message(format!("failed to serialize config: {err}")))?;

    for path in env_vars::inject_env_vars(&mut json) {
        warn!(
            "No value for secret '{}': set {} or {}",
            path,
            env_vars::secret_path_to_env_var(&path),
            env_vars::legacy_secret_path_to_env_var(&path)
        );
    }

    serde_json::from_value(json)
        .map_err(|err| ConfigError::Message(format!("failed to deserialize config: {err}")))
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file name comes from `DOTENV_OVERRIDE`, then from a first command line
/// argument starting with `.env`, and defaults to `.env`. Loading happens once
/// per process; the chosen path is returned.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = std::env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
