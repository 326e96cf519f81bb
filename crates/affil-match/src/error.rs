//! Error types for index construction.

#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("failed to build name automaton: {0}")]
    Automaton(#[from] aho_corasick::BuildError),
}
