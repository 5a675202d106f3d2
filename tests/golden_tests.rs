//! Golden Tests for typedef fixtures
//!
//! Checks each fixture pair against its expected findings, then runs the
//! whole fixture directory through discovery and the pair driver.

use std::fs;
use std::path::{Path, PathBuf};

use typedef_check::{
    check_bytes, check_directory, data_file_for, discover_pairs, find_typedef_files,
    PairStatus, SchemaNode, Severity, Validator,
};

fn fixtures_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn messages(report: &typedef_check::ValidationReport) -> Vec<(Severity, &str)> {
    report
        .findings
        .iter()
        .map(|f| (f.severity, f.message.as_str()))
        .collect()
}

// =============================================================================
// Single Pair Tests
// =============================================================================

#[test]
fn test_user_fixture_passes() {
    let report = check_bytes(
        include_bytes!("fixtures/user.typedef.json"),
        include_bytes!("fixtures/user.json"),
        &Validator::default(),
    )
    .unwrap();
    assert!(report.is_clean(), "unexpected findings: {:?}", report.findings);
}

#[test]
fn test_recursive_tree_fixture_passes() {
    let report = check_bytes(
        include_bytes!("fixtures/tree.typedef.json"),
        include_bytes!("fixtures/tree.json"),
        &Validator::default(),
    )
    .unwrap();
    assert!(report.is_clean(), "unexpected findings: {:?}", report.findings);
}

#[test]
fn test_orders_fixture_findings() {
    let report = check_bytes(
        include_bytes!("fixtures/broken/orders.typedef.json"),
        include_bytes!("fixtures/broken/orders.json"),
        &Validator::default(),
    )
    .unwrap();

    assert_eq!(
        messages(&report),
        vec![
            (Severity::Warning, "unexpected field 'note' at [1]"),
            (Severity::UnknownType, "unknown type at [1].coupon"),
            (Severity::Error, "expected number at [1].price"),
            (Severity::Error, "missing key 'sku' at [2]"),
            (Severity::UnknownType, "unknown type at [3].coupon"),
        ]
    );
    assert!(!report.passed());
}

#[test]
fn test_malformed_fixture_rejected_at_parse_time() {
    let err = SchemaNode::from_slice(include_bytes!("fixtures/malformed/bad.typedef.json"))
        .unwrap_err();
    assert!(err.is_malformed_input());
    assert!(err.to_string().contains("$.properties.rows"));
}

// =============================================================================
// Discovery Tests
// =============================================================================

#[test]
fn test_find_typedef_files_sorted() {
    let root = fixtures_path();
    let found = find_typedef_files(&root).unwrap();
    let relative: Vec<_> = found
        .iter()
        .map(|p| p.strip_prefix(&root).unwrap().to_path_buf())
        .collect();

    assert_eq!(
        relative,
        vec![
            PathBuf::from("broken/orders.typedef.json"),
            PathBuf::from("malformed/bad.typedef.json"),
            PathBuf::from("orphan.typedef.json"),
            PathBuf::from("tree.typedef.json"),
            PathBuf::from("user.typedef.json"),
        ]
    );
}

#[test]
fn test_typedef_without_data_is_skipped() {
    let pairs = discover_pairs(&fixtures_path()).unwrap();
    assert_eq!(pairs.len(), 4);
    assert!(pairs.iter().all(|p| !p.typedef.ends_with("orphan.typedef.json")));
    for pair in &pairs {
        assert_eq!(data_file_for(&pair.typedef).unwrap(), pair.data);
    }
}

#[test]
fn test_directories_named_like_typedefs_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("weird.typedef.json")).unwrap();
    fs::write(dir.path().join("weird.json"), "{}").unwrap();

    assert!(find_typedef_files(dir.path()).unwrap().is_empty());
}

#[test]
fn test_missing_root_is_a_discovery_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    assert!(matches!(
        find_typedef_files(&missing),
        Err(typedef_check::TypedefError::Discovery(_))
    ));
}

// =============================================================================
// Full Pipeline Tests
// =============================================================================

#[test]
fn test_full_pipeline_with_fixtures() {
    let summary = check_directory(&fixtures_path(), &Validator::default()).unwrap();

    assert_eq!(summary.outcomes.len(), 4);
    assert_eq!(summary.malformed_count(), 1);
    assert_eq!(summary.failed_count(), 2);
    assert!(!summary.passed());
    assert!(summary.has_warnings());

    let malformed = &summary.outcomes[1];
    assert!(malformed.pair.typedef.ends_with("bad.typedef.json"));
    match &malformed.status {
        PairStatus::Malformed { error } => assert!(error.contains("children")),
        other => panic!("Expected Malformed, got {:?}", other),
    }

    // A malformed pair does not stop later pairs from being checked
    assert!(summary.outcomes[2].passed());
    assert!(summary.outcomes[3].passed());
}

#[test]
fn test_pipeline_malformed_data_document() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.typedef.json"), r#"{ "type": "number" }"#).unwrap();
    fs::write(dir.path().join("a.json"), "[1, ").unwrap();
    fs::write(dir.path().join("b.typedef.json"), r#"{ "type": "number" }"#).unwrap();
    fs::write(dir.path().join("b.json"), "42").unwrap();

    let summary = check_directory(dir.path(), &Validator::default()).unwrap();
    assert_eq!(summary.outcomes.len(), 2);
    match &summary.outcomes[0].status {
        PairStatus::Malformed { error } => assert!(error.starts_with("Malformed JSON")),
        other => panic!("Expected Malformed, got {:?}", other),
    }
    assert!(summary.outcomes[1].passed());
}

#[test]
fn test_summary_serializes_for_json_output() {
    let summary = check_directory(&fixtures_path(), &Validator::default()).unwrap();
    let json = serde_json::to_value(&summary).unwrap();

    let results = json["outcomes"].as_array().unwrap();
    assert_eq!(results[0]["status"], "checked");
    assert_eq!(results[0]["report"]["findings"][0]["severity"], "warning");
    assert_eq!(results[1]["status"], "malformed");
    assert!(results[1]["data"].as_str().unwrap().ends_with("bad.json"));
}

// =============================================================================
// Console Output Tests
// =============================================================================

#[test]
fn test_text_output_for_orders_fixture() {
    let summary = check_directory(&fixtures_path(), &Validator::default()).unwrap();
    let text = summary.render_text("[JTC]: ");

    let data = fixtures_path().join("broken/orders.json").display().to_string();
    let expected = format!(
        "[JTC]: 📜 Validating {data}\n\
         [JTC]: ⚠️ unexpected field 'note' at [1]\n\
         [JTC]: ❗ unknown type at [1].coupon\n\
         [JTC]: ❌ expected number at [1].price\n\
         [JTC]: ❌ missing key 'sku' at [2]\n\
         [JTC]: ❗ unknown type at [3].coupon\n\
         [JTC]: ❌ Validation failed for {data}\n\n"
    );
    assert!(text.starts_with(&expected), "unexpected output:\n{}", text);
}

#[test]
fn test_text_output_for_malformed_and_passing_pairs() {
    let summary = check_directory(&fixtures_path(), &Validator::default()).unwrap();
    let text = summary.render_text("[JTC]: ");

    assert!(text.contains(
        "[JTC]: ❌ Malformed typedef at '$.properties.rows': list node has no 'children' element schema\n"
    ));
    let user = fixtures_path().join("user.json").display().to_string();
    assert!(text.contains(&format!(
        "[JTC]: 📜 Validating {user}\n[JTC]: ✅ Successfully validated {user}\n"
    )));
    assert!(text.lines().all(|line| line.is_empty() || line.starts_with("[JTC]: ")));
}

#[test]
fn test_text_output_for_empty_directory() {
    let dir = tempfile::tempdir().unwrap();
    let summary = check_directory(dir.path(), &Validator::default()).unwrap();
    assert_eq!(summary.render_text("> "), "> No typedef/data pairs found\n");
    assert!(summary.succeeded(true));
}

#[test]
fn test_warnings_only_fail_under_fail_on_warning() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("extra.typedef.json"),
        r#"{ "type": "object", "properties": { "a": { "type": "string" } } }"#,
    )
    .unwrap();
    fs::write(dir.path().join("extra.json"), r#"{ "a": "x", "b": 1 }"#).unwrap();

    let summary = check_directory(dir.path(), &Validator::default()).unwrap();
    assert!(summary.passed());
    assert!(summary.has_warnings());
    assert!(summary.succeeded(false));
    assert!(!summary.succeeded(true));

    let text = summary.render_text("[JTC]: ");
    assert!(text.contains("[JTC]: ⚠️ unexpected field 'b' at \n"));
    assert!(text.contains("[JTC]: ✅ Successfully validated"));
}

#[test]
fn test_failures_fail_regardless_of_warning_policy() {
    let summary = check_directory(&fixtures_path(), &Validator::default()).unwrap();
    assert!(!summary.succeeded(false));
    assert!(!summary.succeeded(true));
}

#[test]
fn test_json_report_totals() {
    let summary = check_directory(&fixtures_path(), &Validator::default()).unwrap();
    let report = summary.json_report().unwrap();

    assert_eq!(report["pairs"], 4);
    assert_eq!(report["failed"], 2);
    assert_eq!(report["malformed"], 1);
    assert_eq!(report["passed"], false);
    assert!(report["generated_at"].as_str().is_some());
    assert_eq!(report["results"].as_array().unwrap().len(), 4);
}

#[test]
fn test_negative_zero_counts_as_number() {
    let validator = Validator::default();
    let schema = br#"{ "type": "number" }"#;
    assert!(check_bytes(schema, b"-0", &validator).unwrap().is_clean());
    assert!(check_bytes(schema, b"0", &validator).unwrap().is_clean());
    assert!(!check_bytes(schema, b"0.5", &validator).unwrap().passed());
}
