//! Fan-out of altitude windows and merging of their results.

use futures::future::try_join_all;
use sigmet_core::error::Result;
use sigmet_core::{plan_levels, AdvisoryError, AdvisoryQuery, AdvisoryType, Feature, FeatureCollection};
use std::collections::HashSet;

use crate::upstream::SigmetClient;

pub struct Aggregator {
    client: SigmetClient,
}

impl Aggregator {
    pub fn new(client: SigmetClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &SigmetClient {
        &self.client
    }

    /// Answer one advisory request.
    ///
    /// With both altitude bounds every planned window is fetched concurrently
    /// and the first failure aborts the whole request. Without them the full
    /// altitude range is fetched in one call.
    pub async fn aggregate(
        &self,
        advisory: AdvisoryType,
        query: &AdvisoryQuery,
    ) -> Result<FeatureCollection> {
        let filters = query.base_filters()?;

        let batches = match query.level_bounds()? {
            Some((level_from, level_to)) => {
                let levels = plan_levels(level_from, level_to)?;
                if levels.is_empty() {
                    return Err(AdvisoryError::InvalidRange("no levels to fetch".to_string()));
                }
                tracing::debug!(%advisory, ?levels, "Planned altitude windows");

                try_join_all(
                    levels
                        .into_iter()
                        .map(|level| self.client.fetch_cached(advisory, filters.with_level(level))),
                )
                .await?
            }
            None => vec![self.client.fetch_cached(advisory, filters).await?],
        };

        Ok(FeatureCollection::new(dedup_by_id(
            batches.into_iter().flatten(),
        )))
    }
}

/// Drop features whose id was already seen, keeping the first occurrence.
pub fn dedup_by_id(features: impl IntoIterator<Item = Feature>) -> Vec<Feature> {
    let mut seen = HashSet::new();
    features
        .into_iter()
        .filter(|feature| seen.insert(feature.id.clone()))
        .collect()
}
