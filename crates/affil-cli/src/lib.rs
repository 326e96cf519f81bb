//! CLI library components for the affiliation resolver.

pub mod batch;
pub mod logging;
