use std::collections::HashMap;

use affil_model::RorId;

/// Display names per institution id, in dataset order (names, then acronyms).
///
/// Lookups accept the bare or the prefixed id.
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    by_id: HashMap<RorId, Vec<String>>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, id: RorId, names: Vec<String>) {
        self.by_id.insert(id, names);
    }

    pub fn get(&self, id: &str) -> Option<&[String]> {
        let id = RorId::new(id).ok()?;
        self.by_id.get(&id).map(Vec::as_slice)
    }

    /// Names for `id`, or an empty slice when the id is unknown.
    pub fn names_or_empty(&self, id: &str) -> &[String] {
        self.get(id).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
