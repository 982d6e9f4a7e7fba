//! GeoJSON data model for hazard advisories.

use crate::identity::IdentityFields;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use std::fmt;

/// Kind of hazard advisory served by the upstream provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdvisoryType {
    /// International SIGMETs (en-route hazards).
    #[serde(rename = "isigmet")]
    EnRoute,
    /// AIRMETs and domestic SIGMETs.
    #[serde(rename = "airsigmet")]
    Airmen,
}

impl AdvisoryType {
    /// Upstream endpoint tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            AdvisoryType::EnRoute => "isigmet",
            AdvisoryType::Airmen => "airsigmet",
        }
    }
}

impl fmt::Display for AdvisoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `[longitude, latitude]` pair.
pub type Position = [f64; 2];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point(Position),
    LineString(Vec<Position>),
    Polygon(Vec<Vec<Position>>),
}

#[derive(Deserialize)]
enum GeometryKind {
    Point,
    LineString,
    Polygon,
}

#[derive(Deserialize)]
struct RawGeometry {
    #[serde(rename = "type")]
    kind: GeometryKind,
    coordinates: Value,
}

// Decoded through a plain struct so `coordinates` may precede `type`
// without going through serde's buffered tag lookup.
impl<'de> Deserialize<'de> for Geometry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let RawGeometry { kind, coordinates } = RawGeometry::deserialize(deserializer)?;
        match kind {
            GeometryKind::Point => serde_json::from_value(coordinates).map(Geometry::Point),
            GeometryKind::LineString => {
                serde_json::from_value(coordinates).map(Geometry::LineString)
            }
            GeometryKind::Polygon => serde_json::from_value(coordinates).map(Geometry::Polygon),
        }
        .map_err(de::Error::custom)
    }
}

/// Attributes of an international SIGMET.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnRouteProperties {
    pub icao_id: Option<String>,
    pub fir_id: Option<String>,
    pub fir_name: Option<String>,
    pub valid_time_from: Option<String>,
    pub valid_time_to: Option<String>,
    pub series_id: Option<String>,
    pub hazard: Option<String>,
    pub qualifier: Option<String>,
    /// Lower bound of the hazard in feet.
    pub base: Option<Number>,
    /// Upper bound of the hazard in feet.
    pub top: Option<Number>,
    pub dir: Option<String>,
    pub spd: Option<String>,
    pub chng: Option<String>,
    pub raw_sigmet: Option<String>,
}

/// Attributes of an AIRMET or domestic SIGMET.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AirmenProperties {
    pub icao_id: Option<String>,
    pub alpha_char: Option<String>,
    pub series_id: Option<String>,
    pub valid_time_from: Option<String>,
    pub valid_time_to: Option<String>,
    pub air_sigmet_type: Option<String>,
    pub hazard: Option<String>,
    pub altitude_hi1: Option<Number>,
    pub altitude_hi2: Option<Number>,
    pub altitude_lo1: Option<Number>,
    pub altitude_lo2: Option<Number>,
    pub movement_dir: Option<Number>,
    pub movement_spd: Option<Number>,
    pub raw_sigmet: Option<String>,
}

impl EnRouteProperties {
    pub fn identity(&self) -> IdentityFields<'_> {
        IdentityFields {
            icao_id: self.icao_id.as_deref(),
            series_id: self.series_id.as_deref(),
            valid_time_from: self.valid_time_from.as_deref(),
            hazard: self.hazard.as_deref(),
            raw_sigmet: self.raw_sigmet.as_deref(),
        }
    }
}

impl AirmenProperties {
    pub fn identity(&self) -> IdentityFields<'_> {
        IdentityFields {
            icao_id: self.icao_id.as_deref(),
            series_id: self.series_id.as_deref(),
            valid_time_from: self.valid_time_from.as_deref(),
            hazard: self.hazard.as_deref(),
            raw_sigmet: self.raw_sigmet.as_deref(),
        }
    }
}

/// Properties of a feature, shaped by its advisory type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AdvisoryProperties {
    EnRoute(EnRouteProperties),
    Airmen(AirmenProperties),
}

impl AdvisoryProperties {
    pub fn advisory_type(&self) -> AdvisoryType {
        match self {
            AdvisoryProperties::EnRoute(_) => AdvisoryType::EnRoute,
            AdvisoryProperties::Airmen(_) => AdvisoryType::Airmen,
        }
    }

    pub fn identity(&self) -> IdentityFields<'_> {
        match self {
            AdvisoryProperties::EnRoute(props) => props.identity(),
            AdvisoryProperties::Airmen(props) => props.identity(),
        }
    }

    pub fn raw_sigmet(&self) -> Option<&str> {
        self.identity().raw_sigmet
    }
}

/// GeoJSON `"type": "Feature"` marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureTag {
    #[default]
    Feature,
}

/// GeoJSON `"type": "FeatureCollection"` marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionTag {
    #[default]
    FeatureCollection,
}

/// An advisory with its assigned identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: FeatureTag,
    pub id: String,
    pub properties: AdvisoryProperties,
    pub geometry: Geometry,
}

impl Feature {
    /// Build a feature, deriving its id from the identity attributes.
    pub fn new(properties: AdvisoryProperties, geometry: Geometry) -> Self {
        let id = properties.identity().feature_id();
        Self {
            kind: FeatureTag::Feature,
            id,
            properties,
            geometry,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: CollectionTag,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            kind: CollectionTag::FeatureCollection,
            features,
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
