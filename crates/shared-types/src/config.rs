use serde::{Deserialize, Serialize};

pub const DEFAULT_SCHOOL_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Where the school backend lives and how long to wait for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchoolApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SchoolApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_SCHOOL_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Client-side tuning, exposed to the browser through a server function.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConsoleSettings {
    /// Delay between the last keystroke and the search request.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            page_size: crate::DEFAULT_PAGE_SIZE,
        }
    }
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_page_size() -> i64 {
    crate::DEFAULT_PAGE_SIZE
}

/// Top-level config file structure matching `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub school_api: SchoolApiConfig,
    #[serde(default)]
    pub console: ConsoleSettings,
}

impl AppConfig {
    /// Apply `SCHOOL_API_URL` / `SCHOOL_API_TIMEOUT_SECS` style overrides.
    /// `lookup` is usually `std::env::var(..).ok()`.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup("SCHOOL_API_URL").filter(|u| !u.trim().is_empty()) {
            self.school_api.base_url = url;
        }
        if let Some(secs) = lookup("SCHOOL_API_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.school_api.timeout_secs = secs;
        }
        if let Some(ms) = lookup("SEARCH_DEBOUNCE_MS").and_then(|v| v.parse().ok()) {
            self.console.debounce_ms = ms;
        }
        self.school_api.base_url = self.school_api.base_url.trim_end_matches('/').to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.school_api.base_url, DEFAULT_SCHOOL_API_URL);
        assert_eq!(config.console.debounce_ms, 300);
    }

    #[test]
    fn partial_toml_keeps_missing_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [school_api]
            base_url = "https://ecole.example.ch/api"
            "#,
        )
        .unwrap();
        assert_eq!(config.school_api.base_url, "https://ecole.example.ch/api");
        assert_eq!(config.school_api.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.console, ConsoleSettings::default());
    }

    #[test]
    fn env_overrides_win_over_file() {
        let config = AppConfig::default().with_overrides(|key| match key {
            "SCHOOL_API_URL" => Some("http://10.0.0.5:8000/api/".to_string()),
            "SCHOOL_API_TIMEOUT_SECS" => Some("3".to_string()),
            "SEARCH_DEBOUNCE_MS" => Some("not a number".to_string()),
            _ => None,
        });
        assert_eq!(config.school_api.base_url, "http://10.0.0.5:8000/api");
        assert_eq!(config.school_api.timeout_secs, 3);
        assert_eq!(config.console.debounce_ms, DEFAULT_DEBOUNCE_MS);
    }
}
