use std::fs;

use serde_json::Value;
use timeline_cms::entries_from_docs_str;

fn fixture_path(name: &str) -> String {
    format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn achievements_export_matches_golden() {
    let docs = fs::read_to_string(fixture_path("achievements_docs.json"))
        .expect("could not read docs fixture");

    let entries = entries_from_docs_str(&docs).expect("could not convert docs");
    let actual = serde_json::to_value(entries).expect("could not serialize entries");

    let expected = fs::read_to_string(fixture_path("achievements_entries.json"))
        .expect("could not read golden entries");
    let expected_value: Value = serde_json::from_str(&expected).expect("golden is not valid JSON");

    assert_eq!(actual, expected_value);
}
