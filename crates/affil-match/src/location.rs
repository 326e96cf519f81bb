//! Location-based disambiguation.
//!
//! A location "matches" when any normalized location field is a substring of
//! the normalized query. This is plain containment without word boundaries:
//! `"usa"` also matches inside `"jerusalem"`. Name matching, by contrast,
//! requires whole-word spans.

use std::collections::BTreeSet;

use affil_model::{Institution, Location};

use crate::normalize::normalize;

/// Normalized, non-empty location fields of one institution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationTerms {
    terms: BTreeSet<String>,
}

impl LocationTerms {
    pub fn new(location: &Location) -> Self {
        let terms = location
            .fields()
            .into_iter()
            .map(normalize)
            .filter(|term| !term.is_empty())
            .collect();
        Self { terms }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// True if any term occurs in `normalized_text`.
    pub fn matches(&self, normalized_text: &str) -> bool {
        self.terms
            .iter()
            .any(|term| normalized_text.contains(term.as_str()))
    }
}

/// Whether the institution's country, subdivision or locality occurs in
/// `normalized_text`.
pub fn has_location_match(institution: &Institution, normalized_text: &str) -> bool {
    LocationTerms::new(&institution.location).matches(normalized_text)
}
