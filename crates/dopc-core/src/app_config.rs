use std::net::SocketAddr;

use crate::types::OpenEndedRanges;

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
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Root of the venue data service; `/{slug}/static` and `/{slug}/dynamic`
    /// are appended to it.
    pub venue_api_base_url: String,
    pub venue_request_timeout_secs: u64,
    pub venue_user_agent: String,
    pub venue_max_retries: u32,
    pub venue_retry_backoff_base_ms: u64,
    pub open_ended_ranges: OpenEndedRanges,
}
