use std::net::SocketAddr;

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

/// Static inputs the metric reducers depend on.
///
/// Kept separate from [`AppConfig`] so reducers can be exercised without any
/// network or server settings.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsConfig {
    /// Fixed USD→BRL conversion applied to total revenue. Never looked up live.
    pub usd_brl_rate: f64,
    /// SKUs that mark a line item as a shipping charge rather than a product.
    pub shipping_skus: Vec<String>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            usd_brl_rate: 5.0,
            shipping_skus: vec!["SHIPPING".to_string()],
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub source_url: String,
    pub source_timeout_secs: u64,
    /// `None` disables the read-through cache.
    pub source_cache_minutes: Option<u64>,
    /// Maximum number of attempts per fetch, including the first one.
    pub source_retry_count: u32,
    pub source_retry_backoff_ms: u64,
    pub source_user_agent: String,
    pub source_api_token: Option<String>,
    pub source_max_pages: usize,
    pub source_page_delay_ms: u64,
    pub metrics: MetricsConfig,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("source_url", &self.source_url)
            .field("source_timeout_secs", &self.source_timeout_secs)
            .field("source_cache_minutes", &self.source_cache_minutes)
            .field("source_retry_count", &self.source_retry_count)
            .field("source_retry_backoff_ms", &self.source_retry_backoff_ms)
            .field("source_user_agent", &self.source_user_agent)
            .field(
                "source_api_token",
                &self.source_api_token.as_ref().map(|_| "[redacted]"),
            )
            .field("source_max_pages", &self.source_max_pages)
            .field("source_page_delay_ms", &self.source_page_delay_ms)
            .field("metrics", &self.metrics)
            .finish()
    }
}
