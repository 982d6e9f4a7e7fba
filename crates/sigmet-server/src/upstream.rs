//! HTTP client for the aviationweather.gov data API.

use chrono::SecondsFormat;
use reqwest::{Client, Url};
use sigmet_core::error::Result;
use sigmet_core::{parse_features, AdvisoryError, AdvisoryType, CacheKey, Feature, Filters};
use std::sync::Arc;

use crate::cache::FeatureCache;
use crate::clock::Clock;

pub const DEFAULT_UPSTREAM_URL: &str = "https://aviationweather.gov";

const USER_AGENT: &str = concat!("sigmet-server/", env!("CARGO_PKG_VERSION"));

fn unavailable(advisory: AdvisoryType, reason: impl Into<String>) -> AdvisoryError {
    AdvisoryError::UpstreamUnavailable {
        advisory,
        reason: reason.into(),
    }
}

/// Fetches advisories upstream and writes every successful result through to
/// the shared cache.
#[derive(Clone)]
pub struct SigmetClient {
    client: Client,
    base_url: String,
    cache: Arc<FeatureCache>,
    clock: Arc<dyn Clock>,
}

impl SigmetClient {
    pub fn new(
        base_url: impl Into<String>,
        cache: Arc<FeatureCache>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache,
            clock,
        }
    }

    pub fn cache(&self) -> &Arc<FeatureCache> {
        &self.cache
    }

    /// `{base}/api/data/{type}?format=geojson[&level=..][&date=..]`
    pub fn request_url(&self, advisory: AdvisoryType, filters: &Filters) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/api/data/{}", self.base_url, advisory))
            .map_err(|err| unavailable(advisory, format!("invalid upstream URL: {}", err)))?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("format", "geojson");
            if let Some(level) = filters.level {
                query.append_pair("level", &level.to_string());
            }
            if let Some(date) = filters.date_at(self.clock.now())? {
                query.append_pair("date", &date.to_rfc3339_opts(SecondsFormat::Millis, true));
            }
        }

        Ok(url)
    }

    /// Fetch, validate and identify one upstream window, bypassing the cache
    /// for the read but not for the write.
    pub async fn fetch(&self, advisory: AdvisoryType, filters: Filters) -> Result<Vec<Feature>> {
        let url = self.request_url(advisory, &filters)?;
        tracing::info!(%advisory, %url, "Fetching advisories");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| unavailable(advisory, err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(unavailable(advisory, format!("HTTP {}", status)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| unavailable(advisory, err.to_string()))?;

        let features = parse_features(advisory, &body)?;
        tracing::debug!(%advisory, count = features.len(), "Upstream advisories validated");

        self.cache
            .put(CacheKey::new(advisory, &filters), features.clone());

        Ok(features)
    }

    /// Cached features for this window, fetching upstream on a miss.
    pub async fn fetch_cached(
        &self,
        advisory: AdvisoryType,
        filters: Filters,
    ) -> Result<Vec<Feature>> {
        let key = CacheKey::new(advisory, &filters);
        if let Some(features) = self.cache.get(&key) {
            tracing::debug!(%key, "Feature cache hit");
            return Ok(features);
        }

        tracing::debug!(%key, "Feature cache miss");
        self.fetch(advisory, filters).await
    }
}
