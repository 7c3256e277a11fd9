use anyhow::{Context, Result};
use std::{env, time::Duration};

pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:5000";

/// Where the route service lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub base_url: String,
    /// `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVICE_URL.to_string(),
            timeout: None,
        }
    }
}

impl ServiceConfig {
    /// Reads `ROUTES_SERVICE_URL` and `ROUTES_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(
            env::var("ROUTES_SERVICE_URL").ok(),
            env::var("ROUTES_TIMEOUT_SECS").ok(),
        )
    }

    fn from_vars(url: Option<String>, timeout_secs: Option<String>) -> Result<Self> {
        let base_url = url
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string());
        let timeout = timeout_secs
            .map(|secs| {
                secs.trim()
                    .parse::<u64>()
                    .with_context(|| format!("ROUTES_TIMEOUT_SECS is not a number: {}", secs))
            })
            .transpose()?
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);
        Ok(Self { base_url, timeout })
    }
}
