//! Shared application state.

use std::sync::Arc;

use crate::aggregator::Aggregator;
use crate::cache::FeatureCache;
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::upstream::SigmetClient;

/// Everything a request handler needs. Built once at startup and shared
/// behind an `Arc`.
pub struct AppState {
    aggregator: Aggregator,
    config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Build state around an explicit time source.
    pub fn with_clock(config: Config, clock: Arc<dyn Clock>) -> Self {
        let cache = Arc::new(FeatureCache::new(config.cache_ttl(), clock.clone()));
        let client = SigmetClient::new(config.upstream_url.clone(), cache, clock);
        Self {
            aggregator: Aggregator::new(client),
            config,
        }
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    pub fn cache(&self) -> &FeatureCache {
        self.aggregator.client().cache()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
