use super::*;
use crate::sequence::script::{ScriptBuilder, Step};

fn script() -> Script {
    ScriptBuilder::new("table", "frame")
        .step(Step::new("scan", 500))
        .step(Step::new("score", 500))
        .build()
        .unwrap()
}

#[test]
fn lookup_by_phase() {
    let table = ExplanationTable::new()
        .with("scan", Explanation::new("Scan", "Reads the page", "Every row is read."));
    assert_eq!(table.lookup(&Phase::from("scan")).unwrap().title, "Scan");
    assert!(table.lookup(&Phase::from("score")).is_none());
    assert_eq!(table.len(), 1);
}

#[test]
fn insert_replaces_existing_entry() {
    let mut table = ExplanationTable::new();
    table.insert("scan", Explanation::new("Old", "", ""));
    table.insert("scan", Explanation::new("New", "", ""));
    assert_eq!(table.len(), 1);
    assert_eq!(table.lookup(&Phase::from("scan")).unwrap().title, "New");
}

#[test]
fn rejects_phases_the_script_never_enters() {
    let ok = ExplanationTable::new().with("score", Explanation::new("Score", "", ""));
    ok.validate_against(&script()).unwrap();

    let bad = ok.with("unknown", Explanation::new("?", "", ""));
    let err = bad.validate_against(&script()).unwrap_err();
    assert!(matches!(err, ChoreoError::Script(_)));
    assert!(err.to_string().contains("unknown"));
}

#[test]
fn parses_a_phase_keyed_object() {
    let json = r#"{
        "scan": {"title": "Scan", "short_description": "s", "detail": "d"},
        "score": {"title": "Score", "short_description": "s", "detail": "d"}
    }"#;
    let table = ExplanationTable::from_reader(json.as_bytes()).unwrap();
    let phases: Vec<&str> = table.phases().map(Phase::as_str).collect();
    assert_eq!(phases, vec!["scan", "score"]);

    let err = ExplanationTable::from_reader(r#"{"scan": {"title": 1}}"#.as_bytes()).unwrap_err();
    assert!(matches!(err, ChoreoError::Serde(_)));
}
