use std::path::PathBuf;
use std::time::Duration;

use shop_client::ClientConfig;

/// Console configuration
///
/// | Variable              | Default                 | Meaning                         |
/// |-----------------------|-------------------------|---------------------------------|
/// | `NEXT_PUBLIC_API_URL` | `http://localhost:8000` | backend base URL                |
/// | `API_TIMEOUT_SECS`    | `30`                    | HTTP timeout                    |
/// | `SHOP_DATA_DIR`       | `./.shop`               | local store (cart, session)     |
/// | `SHOP_LOG_DIR`        | unset                   | daily rolling log files         |
/// | `SEARCH_DEBOUNCE_MS`  | `300`                   | search-as-you-type delay        |
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub client: ClientConfig,
    pub data_dir: PathBuf,
    pub log_dir: Option<PathBuf>,
    pub search_debounce: Duration,
}

pub const DEFAULT_DATA_DIR: &str = "./.shop";
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

impl AppConfig {
    /// Load from environment variables; unset values use defaults
    pub fn from_env() -> Self {
        Self {
            client: ClientConfig::from_env(),
            data_dir: std::env::var("SHOP_DATA_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            log_dir: std::env::var("SHOP_LOG_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            search_debounce: Duration::from_millis(
                std::env::var("SEARCH_DEBOUNCE_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_SEARCH_DEBOUNCE_MS),
            ),
        }
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.client.base_url = url.into();
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    /// Path of the JSON key/value store
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join("storage.json")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
