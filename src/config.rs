//! Environment-driven settings for the client and the reference backend.

use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin of the calculator API, without a trailing slash.
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Reads `RS3CALC_BASE_URL` and `RS3CALC_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let base_url = env::var("RS3CALC_BASE_URL").ok();
        let timeout = env::var("RS3CALC_TIMEOUT_SECS").ok();
        Self::from_values(base_url.as_deref(), timeout.as_deref())
    }

    pub fn from_values(base_url: Option<&str>, timeout_secs: Option<&str>) -> Self {
        let base_url = base_url
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
            .to_string();
        let secs = match timeout_secs.map(str::trim) {
            None => DEFAULT_TIMEOUT_SECS,
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    log::warn!("invalid RS3CALC_TIMEOUT_SECS '{raw}', defaulting to {DEFAULT_TIMEOUT_SECS}");
                    DEFAULT_TIMEOUT_SECS
                }
            },
        };
        Self {
            base_url,
            timeout: Duration::from_secs(secs),
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self::from_values(Some(base_url.as_str()), None)
    }
}

/// Bind address for `rs3calc serve`, from `RS3CALC_BIND`.
pub fn bind_addr_from_env() -> String {
    env::var("RS3CALC_BIND").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
}
