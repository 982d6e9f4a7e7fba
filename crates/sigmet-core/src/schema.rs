//! Validation of upstream GeoJSON payloads.
//!
//! Each advisory type has its own property schema. Payloads are decoded into
//! the typed structs and rejected whole on the first mismatch; unknown
//! attributes are dropped.

use crate::error::{AdvisoryError, Result};
use crate::models::{
    AdvisoryProperties, AdvisoryType, AirmenProperties, CollectionTag, EnRouteProperties,
    Feature, FeatureTag, Geometry,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct UpstreamFeature<P> {
    #[serde(rename = "type")]
    _kind: FeatureTag,
    properties: P,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct EnRouteCollection {
    #[serde(rename = "type")]
    _kind: CollectionTag,
    features: Vec<UpstreamFeature<EnRouteProperties>>,
}

// The airsigmet endpoint is not checked for a collection marker.
#[derive(Debug, Deserialize)]
struct AirmenCollection {
    features: Vec<UpstreamFeature<AirmenProperties>>,
}

/// Decode and validate an upstream response body, assigning ids.
pub fn parse_features(advisory: AdvisoryType, body: &[u8]) -> Result<Vec<Feature>> {
    let invalid = |err: serde_json::Error| AdvisoryError::SchemaValidation {
        advisory,
        message: err.to_string(),
    };

    let features = match advisory {
        AdvisoryType::EnRoute => serde_json::from_slice::<EnRouteCollection>(body)
            .map_err(invalid)?
            .features
            .into_iter()
            .map(|f| Feature::new(AdvisoryProperties::EnRoute(f.properties), f.geometry))
            .collect(),
        AdvisoryType::Airmen => serde_json::from_slice::<AirmenCollection>(body)
            .map_err(invalid)?
            .features
            .into_iter()
            .map(|f| Feature::new(AdvisoryProperties::Airmen(f.properties), f.geometry))
            .collect(),
    };

    Ok(features)
}
