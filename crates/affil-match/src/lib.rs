#![deny(unsafe_code)]

//! Affiliation-string resolution against an organization registry.
//!
//! Build a [`ReferenceIndex`] once from a loaded registry snapshot, share it
//! behind an `Arc`, and query it through a [`MatchEngine`]:
//!
//! ```rust,ignore
//! let snapshot = RegistrySnapshot::load(&path)?;
//! let index = Arc::new(ReferenceIndex::build(snapshot, DEFAULT_MIN_NAME_LEN)?);
//! let records = MatchEngine::new(index).find_records("Dept. of Physics, MIT, Cambridge MA");
//! ```

pub mod engine;
pub mod error;
pub mod index;
pub mod location;
pub mod normalize;
pub mod options;
pub mod record;

pub use engine::{Candidate, MatchEngine, MatchOutcome, ResolvedMatch, select_non_overlapping};
pub use error::MatchError;
pub use index::{IndexStats, InstitutionIdx, ReferenceIndex};
pub use location::{LocationTerms, has_location_match};
pub use normalize::{is_all_uppercase, normalize};
pub use options::{DEFAULT_MIN_NAME_LEN, MatchOptions};
pub use record::RecordFactory;
