use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;

#[allow(deprecated)]
fn regress() -> Command {
    Command::cargo_bin("regress").expect("binary")
}

#[test]
fn normalize_prints_to_stdout() {
    let temp = tempdir().unwrap();
    let source = temp.path().join("Sum.java");
    fs::write(&source, "public int sum(int a, int b) { int c = a + b; }").unwrap();

    regress()
        .arg("normalize")
        .arg(&source)
        .assert()
        .success()
        .stdout("public int sum(int a, int b) {\n int c = a + b;\n     return 0;\n }\n");
}

#[test]
fn normalize_writes_output_file() {
    let temp = tempdir().unwrap();
    let source = temp.path().join("Flag.java");
    let output = temp.path().join("Flag_normalized.java");
    fs::write(&source, "public boolean ok()\n{\n    int x = 1;\n}\n").unwrap();

    regress()
        .arg("normalize")
        .arg(&source)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "public boolean ok()\n{\n    int x = 1;\n    return false;\n}\n"
    );
}

#[test]
fn signature_text_and_json() {
    let temp = tempdir().unwrap();
    let source = temp.path().join("Words.java");
    fs::write(
        &source,
        "public class Words {\n    public String[] split(String s, char sep) {\n    }\n}\n",
    )
    .unwrap();

    regress()
        .arg("signature")
        .arg(&source)
        .assert()
        .success()
        .stdout("String[] split(String, char)\n");

    let output = regress()
        .arg("signature")
        .arg(&source)
        .arg("--json")
        .output()
        .expect("command run");
    assert!(output.status.success());
    let body: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(body["name"], "split");
    assert_eq!(body["return_type"], "String[]");
    assert_eq!(body["param_types"], serde_json::json!(["String", "char"]));
}

#[test]
fn missing_source_reports_path() {
    regress()
        .args(["signature", "does/not/exist.java"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does/not/exist.java"));
}
