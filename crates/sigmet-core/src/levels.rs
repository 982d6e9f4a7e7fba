//! Altitude window planning.
//!
//! The upstream provider answers a `level` query with the advisories that
//! intersect a 6,000 ft band centred on that level. Wider ranges are split
//! into several bands and fetched separately.

use crate::error::{AdvisoryError, Result};

/// Height of one upstream altitude band, in feet.
pub const LEVEL_STEP: f64 = 6000.0;

/// Most altitude windows a single query may fan out to.
pub const MAX_LEVEL_WINDOWS: usize = 64;

/// Midpoint altitudes covering `level_from..level_to`.
///
/// The first band starts at `level_from`, the last one (when there is more
/// than one) ends at `level_to`, and bands in between are stacked one step
/// apart. A single band is always anchored at `level_from`, even when it
/// then overshoots `level_to`.
pub fn plan_levels(level_from: f64, level_to: f64) -> Result<Vec<f64>> {
    if !level_from.is_finite() || !level_to.is_finite() || level_to <= level_from {
        return Err(AdvisoryError::InvalidRange(format!(
            "levelTo ({}) must be greater than levelFrom ({})",
            level_to, level_from
        )));
    }

    let windows = ((level_to - level_from) / LEVEL_STEP).ceil();
    if windows > MAX_LEVEL_WINDOWS as f64 {
        return Err(AdvisoryError::InvalidRange(format!(
            "{} to {} spans more than {} altitude windows",
            level_from, level_to, MAX_LEVEL_WINDOWS
        )));
    }

    let count = windows as usize;
    if count == 0 {
        return Err(AdvisoryError::InvalidRange("no levels to fetch".to_string()));
    }

    let half_step = LEVEL_STEP / 2.0;
    let mut levels: Vec<f64> = Vec::with_capacity(count);
    for i in 0..count {
        let level = if i == 0 {
            level_from + half_step
        } else if i == count - 1 {
            level_to - half_step
        } else {
            levels[i - 1] + LEVEL_STEP
        };
        levels.push(level);
    }

    Ok(levels)
}

/// Parse a raw `levelFrom`/`levelTo` query value.
pub fn parse_level(name: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|level| level.is_finite())
        .ok_or_else(|| AdvisoryError::InvalidRange(format!("{} is not a number: {:?}", name, raw)))
}
