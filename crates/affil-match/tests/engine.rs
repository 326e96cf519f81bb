use std::sync::Arc;

use affil_match::{MatchEngine, MatchOptions, MatchOutcome, ReferenceIndex};
use affil_registry::RegistrySnapshot;

const REGISTRY: &str = "\
id,names,acronyms,country_name,country_subdivision_name,location_name
X1,Example University,,USA,,
G1,Institute of Physics,IOP,Germany,Bavaria,Munich
U1,Institute of Physics,IOP,United Kingdom,England,London
L1,Laboratory for Advanced Beam Science,LABS,USA,New York,Upton
UC,University of California,UC,United States,California,Oakland
UCB,University of California Berkeley,UCB;UC Berkeley,United States,California,Berkeley
AB,AB,,Sweden,,
HV,Harvard University;Harvard,,United States,Massachusetts,Cambridge
HMS,Harvard Medical School,HMS,United States,Massachusetts,Boston
MT,Massachusetts Institute of Technology,MIT,United States,Massachusetts,Cambridge
CS,Computer Science and Artificial Intelligence Laboratory,MIT-CSAIL,United States,Massachusetts,Cambridge
";

fn engine() -> MatchEngine {
    let snapshot = RegistrySnapshot::from_csv_bytes(REGISTRY.as_bytes(), "fixture").unwrap();
    let index = ReferenceIndex::build(snapshot, 3).expect("build index");
    MatchEngine::new(Arc::new(index))
}

fn ids(engine: &MatchEngine, text: &str) -> Vec<String> {
    engine
        .find_records(text)
        .into_iter()
        .map(|record| record.id)
        .collect()
}

#[test]
fn visiting_example_university() {
    let records = engine().find_records("Visiting Example University, USA");
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.id, "https://ror.org/X1");
    assert_eq!(record.names, vec!["Example University"]);
    assert_eq!(record.location, "USA");
}

#[test]
fn no_recognizable_name_yields_nothing() {
    let engine = engine();
    assert!(engine.find_records("").is_empty());
    assert!(engine.find_records("  ;;; --- ").is_empty());
    assert!(engine.find_records("Department of Chemistry, Nowhere").is_empty());
}

#[test]
fn partial_tokens_do_not_match() {
    let engine = engine();
    assert!(engine.find_records("Example Universityx").is_empty());
    assert!(engine.find_records("Counterexample University").is_empty());
}

#[test]
fn punctuation_and_hyphens_are_ignored() {
    assert_eq!(
        ids(&engine(), "Dept. of Physics; EXAMPLE-University!"),
        vec!["https://ror.org/X1"]
    );
}

#[test]
fn ambiguous_name_resolved_by_location() {
    let engine = engine();
    assert_eq!(
        ids(&engine, "Institute of Physics, Germany"),
        vec!["https://ror.org/G1"]
    );
    assert_eq!(
        ids(&engine, "Institute of Physics, London"),
        vec!["https://ror.org/U1"]
    );
}

#[test]
fn ambiguous_name_without_location_is_dropped() {
    let engine = engine();
    assert!(engine.find_records("Institute of Physics").is_empty());

    let matches = engine.find_matches("Institute of Physics, Paris");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].candidates, 2);
    assert_eq!(matches[0].outcome, MatchOutcome::Unresolved);
}

#[test]
fn several_matching_locations_pick_dataset_order() {
    assert_eq!(
        ids(&engine(), "Institute of Physics, Germany and England"),
        vec!["https://ror.org/G1"]
    );
}

#[test]
fn uppercase_acronym_requires_verbatim_occurrence() {
    let engine = engine();
    assert_eq!(ids(&engine, "National LABS"), vec!["https://ror.org/L1"]);
    assert!(engine.find_records("National labs").is_empty());
    assert!(engine.find_records("National Labs").is_empty());

    let matches = engine.find_matches("National labs");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].name, "labs");
    assert_eq!(matches[0].outcome, MatchOutcome::AcronymRejected);
}

#[test]
fn acronym_guard_applies_before_disambiguation() {
    let engine = engine();
    assert_eq!(ids(&engine, "IOP, Munich"), vec!["https://ror.org/G1"]);
    assert!(engine.find_records("iop munich").is_empty());
}

#[test]
fn punctuated_acronym_requires_original_spelling() {
    let engine = engine();
    assert_eq!(
        ids(&engine, "MIT-CSAIL, Cambridge, MA"),
        vec!["https://ror.org/CS"]
    );
    assert!(engine.find_records("MIT CSAIL, Cambridge, MA").is_empty());

    let matches = engine.find_matches("MIT CSAIL, Cambridge, MA");
    assert_eq!(matches[0].name, "mit csail");
    assert_eq!(matches[0].outcome, MatchOutcome::AcronymRejected);
}

#[test]
fn acronym_guard_can_be_disabled() {
    let engine = engine().with_options(MatchOptions::default().with_acronym_guard(false));
    assert_eq!(ids(&engine, "national labs"), vec!["https://ror.org/L1"]);
    assert_eq!(ids(&engine, "iop munich"), vec!["https://ror.org/G1"]);
}

#[test]
fn short_names_never_match() {
    let engine = engine();
    assert!(engine.find_records("AB").is_empty());
    assert!(engine.find_records("AB, Sweden").is_empty());
    // "UC" is only an acronym of two characters.
    assert!(engine.find_records("UC, Oakland").is_empty());
    assert!(engine.index().lookup("ab").is_some());
}

#[test]
fn engine_follows_index_min_name_len() {
    let snapshot = RegistrySnapshot::from_csv_bytes(REGISTRY.as_bytes(), "fixture").unwrap();
    let engine = MatchEngine::new(Arc::new(ReferenceIndex::build(snapshot, 2).unwrap()));
    assert_eq!(engine.options().min_name_len, 2);
    assert_eq!(ids(&engine, "AB, Sweden"), vec!["https://ror.org/AB"]);

    let stricter = engine.with_options(MatchOptions::default());
    assert!(stricter.find_records("AB, Sweden").is_empty());
}

#[test]
fn longest_name_wins_at_same_start() {
    let engine = engine();
    assert_eq!(
        ids(&engine, "University of California Berkeley"),
        vec!["https://ror.org/UCB"]
    );
    assert_eq!(
        ids(&engine, "Harvard Medical School, Boston"),
        vec!["https://ror.org/HMS"]
    );
    assert_eq!(
        ids(&engine, "University of California, Oakland"),
        vec!["https://ror.org/UC"]
    );
}

#[test]
fn records_follow_text_order() {
    let engine = engine();
    assert_eq!(
        ids(&engine, "Harvard University and Example University"),
        vec!["https://ror.org/HV", "https://ror.org/X1"]
    );
    assert_eq!(
        ids(&engine, "Example University; Harvard"),
        vec!["https://ror.org/X1", "https://ror.org/HV"]
    );
}

#[test]
fn repeated_mentions_yield_repeated_records() {
    assert_eq!(
        ids(
            &engine(),
            "Dept of Physics, Massachusetts Institute of Technology (MIT), Cambridge, MA"
        ),
        vec!["https://ror.org/MT", "https://ror.org/MT"]
    );
}

#[test]
fn match_offsets_point_into_normalized_text() {
    let matches = engine().find_matches("Visiting Example University, USA");
    assert_eq!(matches.len(), 1);
    // normalized: "visiting example university usa"
    assert_eq!(matches[0].start, 9);
    assert_eq!(matches[0].end, 27);
    assert_eq!(matches[0].name, "example university");
}

#[test]
fn resolved_match_json_shape() {
    let matches = engine().find_matches("IOP, Munich");
    insta::assert_json_snapshot!(matches, @r#"
    [
      {
        "start": 0,
        "end": 3,
        "name": "iop",
        "candidates": 2,
        "outcome": {
          "kind": "resolved",
          "id": "G1"
        }
      }
    ]
    "#);
}

#[test]
fn empty_registry_matches_nothing() {
    let snapshot = RegistrySnapshot::from_csv_bytes(b"id,names\n", "empty").unwrap();
    let index = ReferenceIndex::build(snapshot, 3).unwrap();
    let engine = MatchEngine::new(Arc::new(index));
    assert!(engine.find_records("Example University").is_empty());
}

#[test]
fn records_from_matches_agree_with_find_records() {
    let engine = engine();
    let text = "Institute of Physics, Paris and Harvard Medical School, Boston";
    let matches = engine.find_matches(text);
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].outcome, MatchOutcome::Unresolved);
    assert_eq!(engine.records(&matches), engine.find_records(text));
    assert_eq!(ids(&engine, text), vec!["https://ror.org/HMS"]);
}
