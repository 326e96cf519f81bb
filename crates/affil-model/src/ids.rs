#![deny(unsafe_code)]

use std::fmt;

use crate::ModelError;

/// URI prefix shared by every registry identifier.
pub const ROR_PREFIX: &str = "https://ror.org/";

/// Registry identifier, stored in its bare form (`02ex6cf31`).
///
/// Parsing accepts both the bare and the prefixed form so ids coming from
/// the dataset and ids coming from callers compare equal.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct RorId(String);

impl RorId {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let bare = strip_prefix(value.trim());
        if bare.is_empty() || bare.chars().any(char::is_whitespace) {
            return Err(ModelError::InvalidRorId(value));
        }
        Ok(Self(bare.to_string()))
    }

    /// The bare identifier without the URI prefix.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The prefixed URI form used in output records.
    pub fn canonical(&self) -> String {
        format!("{ROR_PREFIX}{}", self.0)
    }
}

impl fmt::Display for RorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn strip_prefix(raw: &str) -> &str {
    raw.strip_prefix(ROR_PREFIX).unwrap_or(raw)
}
