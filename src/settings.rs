use std::time::Duration;

pub const DEFAULT_API_HOST: &str = "http://localhost:8080";
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
pub const STATUS_POLL_INTERVAL_SECS: u64 = 50;

/// Environment variable overriding the API host, for pointing the panel at
/// a development server.
pub const API_HOST_ENV: &str = "TUNNEL_ADMIN_API_HOST";

/// Environment-specific client settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_host: String,
    pub request_timeout: Duration,
    pub status_poll_interval: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_host: DEFAULT_API_HOST.to_string(),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            status_poll_interval: Duration::from_secs(STATUS_POLL_INTERVAL_SECS),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Ok(host) = std::env::var(API_HOST_ENV) {
            if !host.trim().is_empty() {
                settings.api_host = host;
            }
        }
        settings
    }
}
