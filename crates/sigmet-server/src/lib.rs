//! SIGMET server - caching proxy for aviationweather.gov hazard advisories.

pub mod aggregator;
pub mod api;
pub mod cache;
pub mod clock;
pub mod config;
pub mod state;
pub mod upstream;

#[cfg(test)]
pub(crate) mod test_support;
