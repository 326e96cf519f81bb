//! Reference index over registry names.
//!
//! Built once from a [`RegistrySnapshot`] and read-only afterwards. Holds:
//! - normalized name -> institutions denoted by it, in dataset order
//! - per institution, normalized alternate -> original casing
//! - an Aho-Corasick automaton over every searchable normalized name

use std::collections::HashMap;
use std::time::Instant;

use aho_corasick::{AhoCorasick, MatchKind};
use serde::Serialize;
use tracing::info;

use affil_model::{Institution, RorId};
use affil_registry::{LoadReport, NameTable, RegistrySnapshot};

use crate::error::MatchError;
use crate::location::LocationTerms;
use crate::normalize::normalize;

/// Position of an institution in dataset order.
pub type InstitutionIdx = usize;

/// Size figures for an index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub fingerprint: String,
    pub institutions: usize,
    /// Distinct normalized names.
    pub names: usize,
    /// Names long enough to be searched for.
    pub searchable_names: usize,
    /// Names denoting more than one institution.
    pub ambiguous_names: usize,
}

#[derive(Debug)]
pub struct ReferenceIndex {
    institutions: Vec<Institution>,
    location_terms: Vec<LocationTerms>,
    /// Normalized alternate name -> original casing, per institution.
    alternates: Vec<HashMap<String, String>>,
    by_name: HashMap<String, Vec<InstitutionIdx>>,
    by_id: HashMap<RorId, InstitutionIdx>,
    /// Pattern id -> normalized name.
    patterns: Vec<String>,
    automaton: Option<AhoCorasick>,
    names: NameTable,
    fingerprint: String,
    report: LoadReport,
    min_name_len: usize,
}

impl ReferenceIndex {
    /// Build the index, consuming the snapshot.
    pub fn build(snapshot: RegistrySnapshot, min_name_len: usize) -> Result<Self, MatchError> {
        let start = Instant::now();
        let RegistrySnapshot {
            fingerprint,
            institutions,
            names,
            report,
            ..
        } = snapshot;

        let mut by_name: HashMap<String, Vec<InstitutionIdx>> = HashMap::new();
        let mut by_id = HashMap::with_capacity(institutions.len());
        let mut alternates = Vec::with_capacity(institutions.len());
        let mut location_terms = Vec::with_capacity(institutions.len());
        let mut name_count = 0usize;

        for (idx, institution) in institutions.iter().enumerate() {
            by_id.insert(institution.id.clone(), idx);
            location_terms.push(LocationTerms::new(&institution.location));

            let mut originals = HashMap::new();
            for alternate in &institution.alternate_names {
                let key = normalize(alternate);
                if !key.is_empty() {
                    originals.insert(key, alternate.clone());
                }
            }
            alternates.push(originals);

            for name in institution.all_names() {
                let key = normalize(name);
                if key.is_empty() {
                    continue;
                }
                name_count += 1;
                let entry = by_name.entry(key).or_default();
                // Names of one institution are inserted together, so a repeat
                // can only be the last entry.
                if entry.last() != Some(&idx) {
                    entry.push(idx);
                }
            }
        }

        let mut patterns: Vec<String> = by_name
            .keys()
            .filter(|name| name.chars().count() >= min_name_len)
            .cloned()
            .collect();
        patterns.sort_unstable();

        let automaton = if patterns.is_empty() {
            None
        } else {
            Some(
                AhoCorasick::builder()
                    .match_kind(MatchKind::Standard)
                    .build(&patterns)?,
            )
        };

        let index = Self {
            institutions,
            location_terms,
            alternates,
            by_name,
            by_id,
            patterns,
            automaton,
            names,
            fingerprint,
            report,
            min_name_len,
        };
        let stats = index.stats();
        info!(
            institutions = stats.institutions,
            names_indexed = name_count,
            distinct_names = stats.names,
            searchable_names = stats.searchable_names,
            ambiguous_names = stats.ambiguous_names,
            duration_ms = start.elapsed().as_millis(),
            "reference index built"
        );
        Ok(index)
    }

    /// Institutions denoted by a normalized name, in dataset order.
    pub fn lookup(&self, normalized_name: &str) -> Option<&[InstitutionIdx]> {
        self.by_name.get(normalized_name).map(Vec::as_slice)
    }

    pub fn institution(&self, idx: InstitutionIdx) -> &Institution {
        &self.institutions[idx]
    }

    /// Find an institution by bare or prefixed id.
    pub fn institution_by_id(&self, id: &str) -> Option<&Institution> {
        let id = RorId::new(id).ok()?;
        self.by_id.get(&id).map(|&idx| &self.institutions[idx])
    }

    pub fn location_terms(&self, idx: InstitutionIdx) -> &LocationTerms {
        &self.location_terms[idx]
    }

    /// Original casing of `normalized_name` when it is one of the
    /// institution's alternates.
    pub fn original_alternate(&self, idx: InstitutionIdx, normalized_name: &str) -> Option<&str> {
        self.alternates[idx]
            .get(normalized_name)
            .map(String::as_str)
    }

    pub fn names(&self) -> &NameTable {
        &self.names
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn load_report(&self) -> &LoadReport {
        &self.report
    }

    pub fn min_name_len(&self) -> usize {
        self.min_name_len
    }

    pub(crate) fn automaton(&self) -> Option<&AhoCorasick> {
        self.automaton.as_ref()
    }

    pub(crate) fn pattern(&self, pattern_id: usize) -> &str {
        &self.patterns[pattern_id]
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            fingerprint: self.fingerprint.clone(),
            institutions: self.institutions.len(),
            names: self.by_name.len(),
            searchable_names: self.patterns.len(),
            ambiguous_names: self.by_name.values().filter(|v| v.len() > 1).count(),
        }
    }
}
