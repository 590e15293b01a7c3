use std::io::Write;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn demo_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("ui").join("demo.wisp")
}

fn studio() -> Command {
    Command::cargo_bin("wisp-studio").unwrap()
}

fn source_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn renders_the_demo_outline() {
    let expected = predicate::str::contains("Window \"Wisp Demo\" 420x260 [Grid 4x1 gap 8,8]")
        .and(predicate::str::contains("  RadioGroup\n    Radio \"Morning\""))
        .and(predicate::str::contains("  Panel [Flow]\n    Button \"OK\"\n    Button \"Cancel\""));

    studio().arg(demo_path()).assert().success().stdout(expected);
}

#[test]
fn json_output_is_tagged_by_kind() {
    let output = studio().arg(demo_path()).args(["--format", "json"]).output().unwrap();
    assert!(output.status.success());

    let tree: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(tree["title"], "Wisp Demo");
    assert_eq!(tree["layout"]["kind"], "Grid");
    assert_eq!(tree["children"][1]["kind"], "TextField");
    assert_eq!(tree["children"][3]["children"].as_array().map(Vec::len), Some(2));
}

#[test]
fn tokens_flag_prints_the_stream_first() {
    let file = source_file("Window \"T\" (1,1) Layout Flow: End.\n");
    studio()
        .arg(file.path())
        .arg("--tokens")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[Window, \"Window\"]"));
}

#[test]
fn json_tokens_come_before_the_tree() {
    let file = source_file("Window \"T\" (1,1) Layout Flow: End.\n");
    let output = studio()
        .arg(file.path())
        .args(["--tokens", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let mut documents = serde_json::Deserializer::from_slice(&output.stdout).into_iter::<serde_json::Value>();
    let tokens = documents.next().unwrap().unwrap();
    assert_eq!(tokens[0]["kind"], "Window");
    assert_eq!(tokens[2]["kind"], "String");
    assert_eq!(tokens[2]["lexeme"], "T");
    assert_eq!(tokens.as_array().map(Vec::len), Some(14));

    let tree = documents.next().unwrap().unwrap();
    assert_eq!(tree["title"], "T");
    assert!(documents.next().is_none());
}

#[test]
fn syntax_error_is_reported_and_nothing_is_rendered() {
    let file = source_file("Window \"T\" (1,1) Layout Flow: Button \"b\"; End\n");
    studio()
        .arg(file.path())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "incorrect syntax at token 19: GUI: expected Period, found end of file",
        ));
}

#[test]
fn strict_numbers_changes_the_diagnostic() {
    let file = source_file("Window \"T\" (1,1) Layout Flow: Textfield ten; End.\n");
    studio()
        .arg(file.path())
        .arg("--strict-numbers")
        .assert()
        .failure()
        .stderr(predicate::str::contains("found NotFound \"ten\""));
}

#[test]
fn missing_file_fails_before_parsing() {
    let dir = tempfile::tempdir().unwrap();
    studio()
        .arg(dir.path().join("absent.wisp"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read").and(predicate::str::contains("absent.wisp")));
}
