use serde::{Deserialize, Serialize};

/// A resolved organization, as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    /// Prefixed registry URI.
    pub id: String,
    /// Display names (names then acronyms, original casing).
    pub names: Vec<String>,
    /// Non-empty location fields joined with `", "`.
    pub location: String,
}
