//! Server configuration from environment.

use std::env;
use std::time::Duration;

use crate::upstream::DEFAULT_UPSTREAM_URL;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    /// Base URL of the advisory provider, without the `/api/data` suffix.
    pub upstream_url: String,
    pub cache_ttl_s: u64,
    /// Built UI bundle served for non-API paths.
    pub static_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 5173,
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            cache_ttl_s: 60 * 60,
            static_dir: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env::var("SIGMET_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.server_port),
            upstream_url: env::var("SIGMET_UPSTREAM_URL")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.upstream_url),
            cache_ttl_s: env::var("SIGMET_CACHE_TTL_S")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.cache_ttl_s),
            static_dir: env::var("SIGMET_STATIC_DIR")
                .ok()
                .filter(|s| !s.trim().is_empty()),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_s)
    }
}
