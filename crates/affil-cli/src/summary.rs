use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use affil_match::{IndexStats, MatchOutcome, ResolvedMatch};
use affil_model::OutputRecord;
use affil_registry::LoadReport;

pub fn print_records(affiliation: &str, records: &[OutputRecord]) {
    println!("Affiliation: {affiliation}");
    if records.is_empty() {
        println!("  no organizations found");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Id"),
        header_cell("Name"),
        header_cell("Location"),
    ]);
    apply_table_style(&mut table);
    for (pos, record) in records.iter().enumerate() {
        table.add_row(vec![
            Cell::new(pos + 1).set_alignment(CellAlignment::Right),
            Cell::new(&record.id).fg(Color::Green),
            Cell::new(record.names.first().map(String::as_str).unwrap_or("-")),
            Cell::new(&record.location),
        ]);
    }
    println!("{table}");
}

pub fn print_matches(matches: &[ResolvedMatch]) {
    if matches.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Span"),
        header_cell("Name"),
        header_cell("Candidates"),
        header_cell("Outcome"),
    ]);
    apply_table_style(&mut table);
    for m in matches {
        let outcome = match &m.outcome {
            MatchOutcome::Resolved { id } => Cell::new(format!("resolved {id}")).fg(Color::Green),
            MatchOutcome::AcronymRejected => Cell::new("acronym case mismatch").fg(Color::Yellow),
            MatchOutcome::Unresolved => Cell::new("no location match").fg(Color::Yellow),
        };
        table.add_row(vec![
            Cell::new(format!("{}..{}", m.start, m.end)),
            Cell::new(&m.name),
            Cell::new(m.candidates).set_alignment(CellAlignment::Right),
            outcome,
        ]);
    }
    println!("{table}");
}

pub fn print_stats(stats: &IndexStats, report: &LoadReport) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Figure"), header_cell("Value")]);
    apply_table_style(&mut table);
    let rows: [(&str, String); 7] = [
        ("Fingerprint", stats.fingerprint.clone()),
        ("Rows read", report.rows_read.to_string()),
        ("Rows skipped", report.skipped.len().to_string()),
        ("Institutions", stats.institutions.to_string()),
        ("Distinct names", stats.names.to_string()),
        ("Searchable names", stats.searchable_names.to_string()),
        ("Ambiguous names", stats.ambiguous_names.to_string()),
    ];
    for (label, value) in rows {
        table.add_row(vec![
            Cell::new(label).add_attribute(Attribute::Bold),
            Cell::new(value).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{table}");
}

pub fn print_lookup(record: &OutputRecord) {
    println!("Id: {}", record.id);
    if !record.location.is_empty() {
        println!("Location: {}", record.location);
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Names")]);
    apply_table_style(&mut table);
    for name in &record.names {
        table.add_row(vec![Cell::new(name)]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
