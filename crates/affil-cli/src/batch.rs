//! Line-oriented batch resolution.
//!
//! Reads one affiliation per line and writes one JSON object per line:
//! `{"affiliation": "...", "records": [...]}`. Blank lines are skipped;
//! invalid UTF-8 is replaced rather than failing the run.

use std::borrow::Cow;
use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use serde::Serialize;
use tracing::{info, warn};

use affil_match::MatchEngine;
use affil_model::OutputRecord;

#[derive(Debug, Serialize)]
pub struct BatchLine<'a> {
    pub affiliation: &'a str,
    pub records: Vec<OutputRecord>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub affiliations: usize,
    /// Affiliations with at least one record.
    pub matched: usize,
    pub records: usize,
}

/// Resolve every non-blank line of `input`, writing JSON Lines to `output`.
///
/// `progress` is advanced once per input line, blank or not.
pub fn run_batch<R, W>(
    engine: &MatchEngine,
    input: R,
    mut output: W,
    progress: &ProgressBar,
) -> Result<BatchSummary>
where
    R: BufRead,
    W: Write,
{
    let mut summary = BatchSummary::default();
    for (line_no, bytes) in input.split(b'\n').enumerate() {
        let bytes = bytes.with_context(|| format!("read input line {}", line_no + 1))?;
        progress.inc(1);
        let line = String::from_utf8_lossy(&bytes);
        if matches!(line, Cow::Owned(_)) {
            warn!(line = line_no + 1, "invalid UTF-8 replaced in input line");
        }
        let affiliation = line.trim();
        if affiliation.is_empty() {
            continue;
        }
        let records = engine.find_records(affiliation);
        summary.affiliations += 1;
        summary.records += records.len();
        if !records.is_empty() {
            summary.matched += 1;
        }
        serde_json::to_writer(
            &mut output,
            &BatchLine {
                affiliation,
                records,
            },
        )
        .context("serialize batch line")?;
        output.write_all(b"\n").context("write batch line")?;
    }
    output.flush().context("flush batch output")?;
    info!(
        affiliations = summary.affiliations,
        matched = summary.matched,
        records = summary.records,
        "batch complete"
    );
    Ok(summary)
}
