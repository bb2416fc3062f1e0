use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn sample_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("samples")
        .join(name)
}

#[test]
fn parse_sample_as_json() {
    let mut cmd = cargo_bin_cmd!("quizbank");
    cmd.arg("parse").arg(sample_path("hash-marker.txt"));

    let output_pred = predicate::str::contains("\"text\": \"Сколько будет 2+2?\"")
        .and(predicate::str::contains("\"isMultiSelect\": true"));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn parse_sample_as_summary() {
    let mut cmd = cargo_bin_cmd!("quizbank");
    cmd.arg("parse")
        .arg(sample_path("question-marker.txt"))
        .arg("--format")
        .arg("summary");

    let output_pred = predicate::str::starts_with("2 questions")
        .and(predicate::str::contains("1. [single] What is the capital of France?"))
        .and(predicate::str::contains("2. [multi]"));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn parse_tables_sample_as_summary() {
    let mut cmd = cargo_bin_cmd!("quizbank");
    cmd.arg("parse")
        .arg(sample_path("tables.txt"))
        .arg("-f")
        .arg("summary");

    let output_pred = predicate::str::contains("[sequence]").and(predicate::str::contains("[matching]"));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn parse_rejects_legacy_doc() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("legacy.doc");
    fs::write(&path, b"\xd0\xcf\x11\xe0").unwrap();

    let mut cmd = cargo_bin_cmd!("quizbank");
    cmd.arg("parse").arg(&path);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn parse_prose_reports_no_questions() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, "Just some notes.\n").unwrap();

    let mut cmd = cargo_bin_cmd!("quizbank");
    cmd.arg("parse").arg(&path);

    cmd.assert().failure();
}

#[test]
fn select_with_seed_is_reproducible() {
    let run = || {
        let mut cmd = cargo_bin_cmd!("quizbank");
        cmd.arg("select")
            .arg(sample_path("numbered.txt"))
            .arg("--start")
            .arg("1")
            .arg("-n")
            .arg("2")
            .arg("--random")
            .arg("--seed")
            .arg("11");
        cmd.assert().success().get_output().stdout.clone()
    };

    assert_eq!(run(), run());
}

#[test]
fn select_default_count_is_capped_at_the_bank() {
    let mut cmd = cargo_bin_cmd!("quizbank");
    cmd.arg("select").arg(sample_path("numbered.txt")).arg("--start").arg("1");

    let output = cmd.assert().success().get_output().stdout.clone();
    let selected: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let indices: Vec<_> = selected
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["originalIndex"].as_u64())
        .collect();
    assert_eq!(indices, vec![Some(1), Some(2)]);
}

#[test]
fn select_past_the_end_fails() {
    let mut cmd = cargo_bin_cmd!("quizbank");
    cmd.arg("select")
        .arg(sample_path("numbered.txt"))
        .arg("--start")
        .arg("5")
        .arg("-n")
        .arg("1");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Selection error"));
}

#[test]
fn catalog_lists_nested_tests() {
    let dir = TempDir::new().unwrap();
    let manifest = dir.path().join("catalog.json");
    fs::write(
        &manifest,
        r#"{ "tests": [
            { "id": 1, "name": "Algebra", "fileName": "algebra.docx" },
            { "id": "phys", "name": "Physics", "sub_catalogs": [
                { "id": "phys-1", "name": "Mechanics", "path": "phys/mech.txt" } ] }
        ] }"#,
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("quizbank");
    cmd.arg("catalog").arg(&manifest);

    let output_pred = predicate::str::contains("1  Algebra")
        .and(predicate::str::contains("algebra.docx"))
        .and(predicate::str::contains("  phys-1  Mechanics"));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn grammars_follow_configured_order() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("quiz.toml");
    fs::write(&config, "[dispatch]\norder = [\"tables\", \"numbered\"]\n").unwrap();

    let mut cmd = cargo_bin_cmd!("quizbank");
    cmd.arg("grammars").arg("--config").arg(&config);

    let output = cmd.assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8(output).unwrap();
    let tables = stdout.find("  tables").unwrap();
    let numbered = stdout.find("  numbered").unwrap();
    assert!(tables < numbered);
}
