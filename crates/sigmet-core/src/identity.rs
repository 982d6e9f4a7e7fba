//! Deterministic feature identity.
//!
//! The same advisory is returned by every altitude window it intersects, so
//! ids are derived from the advisory's own attributes rather than from the
//! query that produced it.

use sha1::{Digest, Sha1};

/// Attributes that identify an advisory. Missing values hash as empty strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdentityFields<'a> {
    pub icao_id: Option<&'a str>,
    pub series_id: Option<&'a str>,
    pub valid_time_from: Option<&'a str>,
    pub hazard: Option<&'a str>,
    pub raw_sigmet: Option<&'a str>,
}

impl IdentityFields<'_> {
    /// SHA-1 over the ordered concatenation of the fields, as lowercase hex.
    pub fn feature_id(&self) -> String {
        let mut hasher = Sha1::new();
        for field in [
            self.icao_id,
            self.series_id,
            self.valid_time_from,
            self.hazard,
            self.raw_sigmet,
        ] {
            hasher.update(field.unwrap_or_default().as_bytes());
        }
        format!("{:x}", hasher.finalize())
    }
}
