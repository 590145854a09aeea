use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Storefront URL. Required unless `fixture_path` is set.
    pub shop_url: Option<String>,
    /// Offline product JSON file; when set, the live storefront is not contacted.
    pub fixture_path: Option<PathBuf>,
    pub page_size: u32,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub fetch_limit: u32,
    pub inter_request_delay_ms: u64,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
    pub cache_ttl_secs: u64,
}
