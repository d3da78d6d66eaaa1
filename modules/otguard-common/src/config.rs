use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-lite";
pub const DEFAULT_FINDINGS_PATH: &str = "findings.json";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // External sources
    pub nvd_api_key: Option<String>,
    pub gemini_api_key: String,
    pub gemini_model: String,

    // Findings store
    pub store_path: PathBuf,

    // Polling
    pub poll_interval: Duration,
    pub window: Duration,

    // Web server
    pub web_host: String,
    pub web_port: u16,
}

impl Config {
    /// Load configuration for the watcher binary.
    /// Panics with a clear message if required vars are missing.
    pub fn watcher_from_env() -> Self {
        Self {
            nvd_api_key: env::var("NVD_API_KEY").ok(),
            gemini_api_key: required_env("GEMINI_API_KEY"),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            store_path: store_path_from_env(),
            poll_interval: Duration::from_secs(
                parsed_env("POLL_INTERVAL_SECS", 600),
            ),
            window: Duration::from_secs(parsed_env("WINDOW_HOURS", 24) * 3600),
            web_host: String::new(),
            web_port: 0,
        }
    }

    /// Load a minimal config for the web server (read-only, no API keys).
    pub fn web_from_env() -> Self {
        Self {
            nvd_api_key: None,
            gemini_api_key: String::new(),
            gemini_model: String::new(),
            store_path: store_path_from_env(),
            poll_interval: Duration::ZERO,
            window: Duration::ZERO,
            web_host: env::var("WEB_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            web_port: env::var("WEB_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("WEB_PORT must be a number"),
        }
    }

    /// Log the effective configuration without leaking secrets.
    pub fn log_redacted(&self) {
        tracing::info!(
            nvd_key = if self.nvd_api_key.is_some() { "set" } else { "unset" },
            gemini_key = if self.gemini_api_key.is_empty() { "unset" } else { "set" },
            model = %self.gemini_model,
            store = %self.store_path.display(),
            poll_interval_secs = self.poll_interval.as_secs(),
            window_secs = self.window.as_secs(),
            "Configuration loaded"
        );
    }
}

fn store_path_from_env() -> PathBuf {
    env::var("FINDINGS_PATH")
        .unwrap_or_else(|_| DEFAULT_FINDINGS_PATH.to_string())
        .into()
}

fn parsed_env(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{key} must be a number, got '{raw}'")),
        Err(_) => default,
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}
