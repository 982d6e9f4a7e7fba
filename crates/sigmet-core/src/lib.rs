//! SIGMET core - advisory data model, identity hashing and query planning.
//!
//! Pure logic shared by the server; no I/O happens in this crate.

pub mod error;
pub mod identity;
pub mod levels;
pub mod models;
pub mod query;
pub mod schema;

pub use error::AdvisoryError;
pub use identity::IdentityFields;
pub use levels::{plan_levels, LEVEL_STEP, MAX_LEVEL_WINDOWS};
pub use models::{
    AdvisoryProperties, AdvisoryType, AirmenProperties, EnRouteProperties, Feature,
    FeatureCollection, Geometry, Position,
};
pub use query::{AdvisoryQuery, CacheKey, Filters};
pub use schema::parse_features;
