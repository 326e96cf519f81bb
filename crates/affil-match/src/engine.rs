//! Match engine implementation.
//!
//! A query goes through these stages:
//! 1. normalize and pad with one space on each side
//! 2. scan the automaton for every (overlapping) name occurrence
//! 3. keep whole-word occurrences only
//! 4. order by start, longest first at equal start
//! 5. greedily accept non-overlapping spans
//! 6. resolve each span to at most one institution (acronym guard, location)

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug_span, trace};

use affil_model::{OutputRecord, RorId};

use crate::index::{InstitutionIdx, ReferenceIndex};
use crate::normalize::{is_all_uppercase, normalize};
use crate::options::MatchOptions;
use crate::record::RecordFactory;

/// A name occurrence in the padded normalized query.
///
/// Offsets are byte offsets, `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub start: usize,
    pub end: usize,
    pub name: &'a str,
}

impl Candidate<'_> {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// What an accepted span resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchOutcome {
    Resolved { id: RorId },
    /// Every institution behind the name was an uppercase acronym missing
    /// from the original text.
    AcronymRejected,
    /// Ambiguous name with no institution whose location occurs in the text.
    Unresolved,
}

/// An accepted span and its resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedMatch {
    /// Byte offsets into the normalized (unpadded) query.
    pub start: usize,
    pub end: usize,
    /// The normalized registry name that matched.
    pub name: String,
    /// Institutions sharing this name.
    pub candidates: usize,
    pub outcome: MatchOutcome,
    #[serde(skip)]
    institution: Option<InstitutionIdx>,
}

impl ResolvedMatch {
    pub fn institution(&self) -> Option<InstitutionIdx> {
        self.institution
    }
}

/// Resolves affiliation strings against a shared [`ReferenceIndex`].
///
/// Cloning is cheap; clones share the index.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    index: Arc<ReferenceIndex>,
    options: MatchOptions,
}

impl MatchEngine {
    /// Engine with default options and the index's minimum name length.
    pub fn new(index: Arc<ReferenceIndex>) -> Self {
        let options = MatchOptions::default().with_min_name_len(index.min_name_len());
        Self { index, options }
    }

    #[must_use]
    pub fn with_options(mut self, options: MatchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn index(&self) -> &ReferenceIndex {
        &self.index
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Records for every organization mentioned in `text`, left to right.
    pub fn find_records(&self, text: &str) -> Vec<OutputRecord> {
        self.records(&self.find_matches(text))
    }

    /// Records for the resolved entries of `matches`, in order.
    pub fn records(&self, matches: &[ResolvedMatch]) -> Vec<OutputRecord> {
        let factory = RecordFactory::new(self.index.names());
        matches
            .iter()
            .filter_map(ResolvedMatch::institution)
            .map(|idx| factory.build(self.index.institution(idx)))
            .collect()
    }

    /// Every accepted span with its resolution, including the ones that
    /// produce no record.
    pub fn find_matches(&self, text: &str) -> Vec<ResolvedMatch> {
        let span = debug_span!("find_matches", text_len = text.len());
        let _guard = span.enter();

        let normalized = normalize(text);
        if normalized.is_empty() {
            return Vec::new();
        }
        let padded = format!(" {normalized} ");

        let mut candidates = self.scan(&padded);
        candidates.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| b.len().cmp(&a.len())));
        let (accepted, _) = select_non_overlapping(&candidates, padded.len());

        accepted
            .into_iter()
            .map(|candidate| self.resolve(candidate, text, &normalized))
            .collect()
    }

    /// Whole-word name occurrences in `padded`, unordered.
    fn scan(&self, padded: &str) -> Vec<Candidate<'_>> {
        let Some(automaton) = self.index.automaton() else {
            return Vec::new();
        };
        let bytes = padded.as_bytes();
        automaton
            .find_overlapping_iter(padded)
            .map(|m| Candidate {
                start: m.start(),
                end: m.end(),
                name: self.index.pattern(m.pattern().as_usize()),
            })
            .filter(|c| is_word_bounded(bytes, c.start, c.end))
            .filter(|c| c.name.chars().count() >= self.options.min_name_len)
            .collect()
    }

    fn resolve(&self, candidate: Candidate<'_>, original: &str, normalized: &str) -> ResolvedMatch {
        let institutions = self.index.lookup(candidate.name).unwrap_or_default();
        let passing: Vec<InstitutionIdx> = institutions
            .iter()
            .copied()
            .filter(|&idx| self.passes_acronym_guard(idx, candidate.name, original))
            .collect();

        let (institution, outcome) = if passing.is_empty() {
            (None, MatchOutcome::AcronymRejected)
        } else if institutions.len() == 1 {
            let idx = passing[0];
            (Some(idx), self.resolved(idx))
        } else {
            match passing
                .iter()
                .copied()
                .find(|&idx| self.index.location_terms(idx).matches(normalized))
            {
                Some(idx) => (Some(idx), self.resolved(idx)),
                None => (None, MatchOutcome::Unresolved),
            }
        };

        trace!(
            name = candidate.name,
            start = candidate.start,
            candidates = institutions.len(),
            passing = passing.len(),
            outcome = ?outcome,
            "resolved span"
        );

        ResolvedMatch {
            start: candidate.start - 1,
            end: candidate.end - 1,
            name: candidate.name.to_string(),
            candidates: institutions.len(),
            outcome,
            institution,
        }
    }

    fn resolved(&self, idx: InstitutionIdx) -> MatchOutcome {
        MatchOutcome::Resolved {
            id: self.index.institution(idx).id.clone(),
        }
    }

    /// An all-uppercase alternate (longer than one character) only counts
    /// when it appears verbatim in the original text.
    fn passes_acronym_guard(&self, idx: InstitutionIdx, name: &str, original: &str) -> bool {
        if !self.options.acronym_guard {
            return true;
        }
        match self.index.original_alternate(idx, name) {
            Some(alternate) if alternate.chars().count() > 1 && is_all_uppercase(alternate) => {
                original.contains(alternate)
            }
            _ => true,
        }
    }
}

fn is_word_bounded(bytes: &[u8], start: usize, end: usize) -> bool {
    start > 0 && bytes[start - 1] == b' ' && bytes.get(end) == Some(&b' ')
}

/// Greedy sweep over candidates sorted by (start asc, length desc).
///
/// Returns the accepted candidates in order and the consumed-position map
/// over a text of `text_len` bytes.
pub fn select_non_overlapping<'a>(
    sorted: &[Candidate<'a>],
    text_len: usize,
) -> (Vec<Candidate<'a>>, Vec<bool>) {
    sorted.iter().fold(
        (Vec::new(), vec![false; text_len]),
        |(mut accepted, mut consumed), candidate| {
            let span = candidate.start..candidate.end;
            if consumed[span.clone()].iter().all(|taken| !taken) {
                consumed[span].fill(true);
                accepted.push(*candidate);
            }
            (accepted, consumed)
        },
    )
}
