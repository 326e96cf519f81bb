//! Output record construction.

use affil_model::{Institution, OutputRecord};
use affil_registry::NameTable;

/// Shapes matched institutions into [`OutputRecord`]s.
#[derive(Debug, Clone, Copy)]
pub struct RecordFactory<'a> {
    names: &'a NameTable,
}

impl<'a> RecordFactory<'a> {
    pub fn new(names: &'a NameTable) -> Self {
        Self { names }
    }

    pub fn build(&self, institution: &Institution) -> OutputRecord {
        let id = institution.id.canonical();
        OutputRecord {
            names: self.names.names_or_empty(&id).to_vec(),
            id,
            location: institution.location.display(),
        }
    }
}
