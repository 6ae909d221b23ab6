use shared_types::{AppConfig, ConsoleSettings, SchoolApiConfig};
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Path to the config file, relative to the project root.
const CONFIG_PATH: &str = "config.toml";

/// Read `.env` and `config.toml`, apply environment overrides, and store the
/// result in the global `OnceLock`. Only the first call has effect.
///
/// A missing or unparseable file falls back to the built-in defaults.
pub fn load_config() -> &'static AppConfig {
    CONFIG.get_or_init(|| {
        let _ = dotenvy::dotenv();

        let file_config = match std::fs::read_to_string(CONFIG_PATH) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!(path = CONFIG_PATH, error = %e, "Failed to parse config, using defaults");
                AppConfig::default()
            }),
            Err(e) => {
                tracing::info!(path = CONFIG_PATH, error = %e, "Config file not found, using defaults");
                AppConfig::default()
            }
        };

        let config = file_config.with_overrides(|key| std::env::var(key).ok());
        tracing::info!(
            school_api = %config.school_api.base_url,
            timeout_secs = config.school_api.timeout_secs,
            debounce_ms = config.console.debounce_ms,
            "Configuration loaded"
        );
        config
    })
}

/// The loaded configuration. Loads it on first use.
pub fn app_config() -> &'static AppConfig {
    load_config()
}

pub fn school_api_config() -> &'static SchoolApiConfig {
    &app_config().school_api
}

pub fn console_settings() -> &'static ConsoleSettings {
    &app_config().console
}
