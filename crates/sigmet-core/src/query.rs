//! Query parameters, upstream filters and cache signatures.

use crate::error::{AdvisoryError, Result};
use crate::levels::parse_level;
use crate::models::AdvisoryType;
use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;

/// Raw query string of an advisory request. Every value is optional and an
/// empty value counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryQuery {
    pub level_from: Option<String>,
    pub level_to: Option<String>,
    pub hours_change: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl AdvisoryQuery {
    /// Both altitude bounds, or `None` when either is missing.
    pub fn level_bounds(&self) -> Result<Option<(f64, f64)>> {
        match (present(&self.level_from), present(&self.level_to)) {
            (Some(from), Some(to)) => Ok(Some((
                parse_level("levelFrom", from)?,
                parse_level("levelTo", to)?,
            ))),
            _ => Ok(None),
        }
    }

    /// Signed hour offset from now for a point-in-time query.
    pub fn hours_change(&self) -> Result<Option<i64>> {
        let Some(raw) = present(&self.hours_change) else {
            return Ok(None);
        };
        raw.parse::<i64>()
            .ok()
            .filter(|hours| TimeDelta::try_hours(*hours).is_some())
            .map(Some)
            .ok_or_else(|| {
                AdvisoryError::InvalidQuery(format!("hoursChange must be an integer: {:?}", raw))
            })
    }

    /// Filters shared by every window of this query.
    pub fn base_filters(&self) -> Result<Filters> {
        Ok(Filters {
            level: None,
            hours_change: self.hours_change()?,
        })
    }
}

/// Filters sent upstream for a single fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Filters {
    /// Midpoint of the altitude band, in feet.
    pub level: Option<f64>,
    pub hours_change: Option<i64>,
}

impl Filters {
    pub fn with_level(self, level: f64) -> Self {
        Self {
            level: Some(level),
            ..self
        }
    }

    /// Point in time to query, `now` shifted by the hour offset.
    ///
    /// `Ok(None)` means "current advisories"; an offset that leaves the
    /// representable date range is an error.
    pub fn date_at(&self, now: DateTime<Utc>) -> Result<Option<DateTime<Utc>>> {
        let Some(hours) = self.hours_change else {
            return Ok(None);
        };
        TimeDelta::try_hours(hours)
            .and_then(|delta| now.checked_add_signed(delta))
            .map(Some)
            .ok_or_else(|| AdvisoryError::InvalidQuery(format!("hoursChange out of range: {}", hours)))
    }
}

/// Canonical signature of `(advisory type, filters)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(advisory: AdvisoryType, filters: &Filters) -> Self {
        let mut signature = Map::new();
        signature.insert("type".to_string(), Value::from(advisory.as_str()));
        if let Some(level) = filters.level {
            signature.insert("level".to_string(), Value::from(level));
        }
        if let Some(hours) = filters.hours_change {
            signature.insert("hoursChange".to_string(), Value::from(hours));
        }
        Self(Value::Object(signature).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
