//! Tunables for index construction and matching.

/// Names shorter than this (in normalized characters) are never searched for.
pub const DEFAULT_MIN_NAME_LEN: usize = 3;

/// Options shared by the reference index and the match engine.
///
/// [`MatchEngine::new`](crate::MatchEngine::new) takes `min_name_len` from the
/// index it is given; the acronym guard is on by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// Minimum normalized length of a searchable name.
    pub min_name_len: usize,
    /// Require all-uppercase acronyms to appear verbatim in the query.
    pub acronym_guard: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            min_name_len: DEFAULT_MIN_NAME_LEN,
            acronym_guard: true,
        }
    }
}

impl MatchOptions {
    #[must_use]
    pub fn with_min_name_len(mut self, len: usize) -> Self {
        self.min_name_len = len;
        self
    }

    #[must_use]
    pub fn with_acronym_guard(mut self, enable: bool) -> Self {
        self.acronym_guard = enable;
        self
    }
}
