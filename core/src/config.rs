//! Harness configuration: where the storefront lives and the thresholds the
//! scenario tests judge it by.

use std::time::Duration;

use crate::error::HarnessError;

pub const DEFAULT_BASE_URL: &str = "https://fakestoreapi.com";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (GitHub Actions)";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub base_url: String,
    /// Upper bound for any product price the service reports.
    pub max_price: f64,
    /// Slowest acceptable response for a single request.
    pub max_response_time: Duration,
    /// Transport timeout applied to every request.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_price: 1000.0,
            max_response_time: Duration::from_secs(2),
            timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Defaults, overridden by `STORE_BASE_URL`, `STORE_MAX_PRICE`,
    /// `STORE_MAX_RESPONSE_SECS`, `STORE_TIMEOUT_SECS` and `STORE_USER_AGENT`.
    pub fn from_env() -> Result<Self, HarnessError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, HarnessError> {
        let mut config = Config::default();
        if let Some(url) = lookup("STORE_BASE_URL") {
            config.base_url = url;
        }
        if let Some(raw) = lookup("STORE_MAX_PRICE") {
            config.max_price = parse_number("STORE_MAX_PRICE", &raw)?;
        }
        if let Some(raw) = lookup("STORE_MAX_RESPONSE_SECS") {
            config.max_response_time = parse_seconds("STORE_MAX_RESPONSE_SECS", &raw)?;
        }
        if let Some(raw) = lookup("STORE_TIMEOUT_SECS") {
            config.timeout = parse_seconds("STORE_TIMEOUT_SECS", &raw)?;
        }
        if let Some(agent) = lookup("STORE_USER_AGENT") {
            config.user_agent = agent;
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }
}

fn parse_number(key: &str, raw: &str) -> Result<f64, HarnessError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|e| HarnessError::Config(format!("{key}={raw}: {e}")))
}

fn parse_seconds(key: &str, raw: &str) -> Result<Duration, HarnessError> {
    let secs = parse_number(key, raw)?;
    Duration::try_from_secs_f64(secs).map_err(|e| HarnessError::Config(format!("{key}={raw}: {e}")))
}
