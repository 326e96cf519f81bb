//! Registry CSV loading.
//!
//! The dataset has one row per institution with the columns `id`, `names`,
//! `acronyms`, `country_name`, `country_subdivision_name` and
//! `location_name`. Column order does not matter. `names` and `acronyms` are
//! `;`-separated lists; the first entry of `names` is the canonical name.
//!
//! Broken rows never abort a load: they are logged, counted in the
//! [`LoadReport`] and skipped. Only an unreadable file or a header without
//! the `id`/`names` columns is fatal.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use csv::StringRecord;
use serde::Serialize;
use tracing::{info, warn};

use affil_model::{Institution, Location, RorId};

use crate::error::RegistryError;
use crate::hash::sha256_hex;
use crate::names::NameTable;

const COL_ID: &str = "id";
const COL_NAMES: &str = "names";
const COL_ACRONYMS: &str = "acronyms";
const COL_COUNTRY: &str = "country_name";
const COL_SUBDIVISION: &str = "country_subdivision_name";
const COL_LOCALITY: &str = "location_name";

/// Separator inside the `names` and `acronyms` columns.
pub const NAME_LIST_DELIMITER: char = ';';

/// Why a dataset row was left out of the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    Malformed { message: String },
    MissingId,
    InvalidId { value: String },
    MissingName { id: String },
    DuplicateId { id: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { message } => write!(f, "malformed row: {message}"),
            Self::MissingId => f.write_str("missing id"),
            Self::InvalidId { value } => write!(f, "invalid id {value:?}"),
            Self::MissingName { id } => write!(f, "no names for {id}"),
            Self::DuplicateId { id } => write!(f, "duplicate id {id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    /// 1-based line in the source file, when known.
    pub line: Option<u64>,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub rows_read: usize,
    pub institutions: usize,
    pub skipped: Vec<SkippedRow>,
}

/// A fully loaded registry dataset.
#[derive(Debug, Clone)]
pub struct RegistrySnapshot {
    /// Where the snapshot came from (a file path or a caller-supplied label).
    pub source: PathBuf,
    /// SHA-256 of the source bytes.
    pub fingerprint: String,
    /// Institutions in dataset order.
    pub institutions: Vec<Institution>,
    pub names: NameTable,
    pub report: LoadReport,
}

impl RegistrySnapshot {
    /// Load the registry CSV at `path`.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let start = Instant::now();
        let bytes = std::fs::read(path).map_err(|e| RegistryError::io(path, e))?;
        let snapshot = Self::from_csv_bytes(&bytes, path)?;
        info!(
            path = %path.display(),
            institutions = snapshot.institutions.len(),
            skipped = snapshot.report.skipped.len(),
            duration_ms = start.elapsed().as_millis(),
            "registry loaded"
        );
        Ok(snapshot)
    }

    /// Parse registry CSV content; `source` only labels diagnostics.
    pub fn from_csv_bytes(bytes: &[u8], source: impl Into<PathBuf>) -> Result<Self, RegistryError> {
        let source = source.into();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(bytes);
        let headers = reader
            .headers()
            .map_err(|e| RegistryError::Csv {
                path: source.clone(),
                message: e.to_string(),
            })?
            .clone();
        let columns = Columns::resolve(&headers, &source)?;

        let mut institutions = Vec::new();
        let mut names = NameTable::new();
        let mut seen = HashSet::new();
        let mut report = LoadReport::default();

        for result in reader.records() {
            report.rows_read += 1;
            let record = match result {
                Ok(record) => record,
                Err(error) => {
                    let line = error.position().map(csv::Position::line);
                    let reason = SkipReason::Malformed {
                        message: error.to_string(),
                    };
                    skip(&mut report, &source, line, reason);
                    continue;
                }
            };
            let line = record.position().map(csv::Position::line);
            match columns.institution(&record) {
                Ok((institution, display_names)) => {
                    if !seen.insert(institution.id.clone()) {
                        let reason = SkipReason::DuplicateId {
                            id: institution.id.to_string(),
                        };
                        skip(&mut report, &source, line, reason);
                        continue;
                    }
                    names.insert(institution.id.clone(), display_names);
                    institutions.push(institution);
                }
                Err(reason) => skip(&mut report, &source, line, reason),
            }
        }

        report.institutions = institutions.len();
        Ok(Self {
            source,
            fingerprint: sha256_hex(bytes),
            institutions,
            names,
            report,
        })
    }
}

fn skip(report: &mut LoadReport, source: &Path, line: Option<u64>, reason: SkipReason) {
    warn!(
        source = %source.display(),
        line = line.unwrap_or_default(),
        reason = %reason,
        "skipping registry row"
    );
    report.skipped.push(SkippedRow { line, reason });
}

/// Header positions of the dataset columns.
struct Columns {
    id: usize,
    names: usize,
    acronyms: Option<usize>,
    country: Option<usize>,
    subdivision: Option<usize>,
    locality: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord, source: &Path) -> Result<Self, RegistryError> {
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_matches('\u{feff}').trim() == name)
        };
        let required = |name: &str| {
            position(name).ok_or_else(|| RegistryError::MissingColumn {
                path: source.to_path_buf(),
                column: name.to_string(),
            })
        };
        Ok(Self {
            id: required(COL_ID)?,
            names: required(COL_NAMES)?,
            acronyms: position(COL_ACRONYMS),
            country: position(COL_COUNTRY),
            subdivision: position(COL_SUBDIVISION),
            locality: position(COL_LOCALITY),
        })
    }

    /// Build the institution for a row plus its display names.
    fn institution(&self, record: &StringRecord) -> Result<(Institution, Vec<String>), SkipReason> {
        let field = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .map(str::trim)
                .unwrap_or_default()
        };

        let raw_id = field(Some(self.id));
        if raw_id.is_empty() {
            return Err(SkipReason::MissingId);
        }
        let id = RorId::new(raw_id).map_err(|_| SkipReason::InvalidId {
            value: raw_id.to_string(),
        })?;

        let names = split_name_list(field(Some(self.names)));
        let acronyms = split_name_list(field(self.acronyms));
        let Some((canonical, rest)) = names.split_first() else {
            return Err(SkipReason::MissingName { id: id.to_string() });
        };

        let alternate_names: Vec<String> = rest.iter().chain(&acronyms).cloned().collect();
        let display_names: Vec<String> = names.iter().chain(&acronyms).cloned().collect();
        let institution = Institution {
            id,
            name: canonical.clone(),
            alternate_names,
            location: Location::new(
                field(self.country),
                field(self.subdivision),
                field(self.locality),
            ),
        };
        Ok((institution, display_names))
    }
}

/// Split a `;`-separated list, trimming entries and dropping empty ones.
pub fn split_name_list(raw: &str) -> Vec<String> {
    raw.split(NAME_LIST_DELIMITER)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_name_list_drops_blanks() {
        assert_eq!(
            split_name_list(" Foo ;; Bar;  "),
            vec!["Foo".to_string(), "Bar".to_string()]
        );
        assert!(split_name_list("").is_empty());
    }

    #[test]
    fn header_with_bom_is_recognised() {
        let csv = "\u{feff}id,names\nX1,Example University\n";
        let snapshot = RegistrySnapshot::from_csv_bytes(csv.as_bytes(), "inline").unwrap();
        assert_eq!(snapshot.institutions.len(), 1);
        assert_eq!(snapshot.institutions[0].location, Location::default());
    }
}
