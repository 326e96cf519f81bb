use std::sync::{Arc, LazyLock};

use proptest::prelude::*;

use affil_match::{MatchEngine, ReferenceIndex, normalize};
use affil_registry::RegistrySnapshot;

const REGISTRY: &str = "\
id,names,acronyms,country_name,country_subdivision_name,location_name
E1,Example University,EU,USA,,
E2,Example University Hospital,,USA,,Springfield
S1,State Institute of Science,SIS,Canada,Ontario,Toronto
S2,Institute of Science,,France,,Paris
S3,Institute of Science,,Japan,,Kyoto
N1,Nordic Science Centre,NSC,Norway,,Oslo
T1,Io,,Greece,,
";

/// Words that appear in registry names, plus a few that never do.
const WORDS: &[&str] = &[
    "example",
    "university",
    "hospital",
    "state",
    "institute",
    "of",
    "science",
    "nordic",
    "centre",
    "paris",
    "kyoto",
    "NSC",
    "nsc",
    "SIS",
    "io",
    "dept",
    "room",
    "42",
];

/// Tokens that can never extend or form a registry name.
const FILLER: &[&str] = &["dept", "room", "42", "visiting", "po box 7"];

static ENGINE: LazyLock<MatchEngine> = LazyLock::new(|| {
    let snapshot = RegistrySnapshot::from_csv_bytes(REGISTRY.as_bytes(), "props").unwrap();
    MatchEngine::new(Arc::new(ReferenceIndex::build(snapshot, 3).unwrap()))
});

fn query() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 0..12).prop_map(|words| words.join(" "))
}

proptest! {
    #[test]
    fn normalize_is_idempotent(raw in "[A-Za-zÀ-ÿ0-9 _,.;:()'&/\t-]{0,64}") {
        let once = normalize(&raw);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_output_shape(raw in "[A-Za-zÀ-ÿ0-9 _,.;:()'&/\t-]{0,64}") {
        let out = normalize(&raw);
        prop_assert!(!out.starts_with(' ') && !out.ends_with(' '));
        prop_assert!(!out.contains("  "));
        prop_assert!(out.chars().all(|c| c == ' ' || c == '_' || c.is_alphanumeric()));
        prop_assert!(!out.chars().any(char::is_uppercase));
    }

    #[test]
    fn accepted_spans_never_overlap(text in query()) {
        let matches = ENGINE.find_matches(&text);
        for pair in matches.windows(2) {
            prop_assert!(pair[0].end < pair[1].start, "{:?} overlaps {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn short_names_never_match(text in query()) {
        for m in ENGINE.find_matches(&text) {
            prop_assert!(m.name.chars().count() >= 3);
        }
    }

    #[test]
    fn unique_canonical_name_yields_one_record(
        before in prop::collection::vec(prop::sample::select(FILLER), 0..4),
        after in prop::collection::vec(prop::sample::select(FILLER), 0..4),
        (name, id) in prop::sample::select(vec![
            ("Example University", "E1"),
            ("Example University Hospital", "E2"),
            ("State Institute of Science", "S1"),
            ("Nordic Science Centre", "N1"),
        ]),
    ) {
        let text = format!("{}, {name}, {}", before.join(" "), after.join(" "));
        let records = ENGINE.find_records(&text);
        prop_assert_eq!(records.len(), 1);
        prop_assert_eq!(&records[0].id, &format!("https://ror.org/{id}"));
    }
}
