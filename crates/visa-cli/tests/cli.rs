use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;

const PAGE: &str = "Nationality United Kingdom\n\
                    Passport No. AB1234567\n\
                    Visa No. 123456\n\
                    Duration of Stay\n\
                    90 days\n";

fn visa() -> Command {
    Command::cargo_bin("visa").unwrap()
}

fn write_config(dir: &Path) -> String {
    let path = dir.join("config.json");
    visa()
        .args(["config", "init", "-o"])
        .arg(&path)
        .assert()
        .success();
    path.display().to_string()
}

#[test]
fn help_lists_subcommands() {
    visa()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("process"))
        .stdout(predicate::str::contains("batch"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn process_text_layer_to_json() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    let input = dir.path().join("john_smith.txt");
    fs::write(&input, PAGE).unwrap();

    visa()
        .args(["-c", &config, "process", "-f", "json"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"john_smith\""))
        .stdout(predicate::str::contains("\"passport_number\": \"AB1234567\""))
        .stdout(predicate::str::contains("\"duration_of_stay\": \"90\""));
}

#[test]
fn process_missing_file_fails() {
    visa()
        .args(["process", "does-not-exist.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn process_empty_document_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    let input = dir.path().join("blank.txt");
    fs::write(&input, "  \n").unwrap();

    visa()
        .args(["-c", &config, "process"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no extractable text"));
}

#[test]
fn batch_without_matches_fails() {
    let dir = tempfile::tempdir().unwrap();
    let pattern = format!("{}/*.pdf", dir.path().display());

    visa()
        .args(["batch", &pattern])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files found"));
}

#[test]
fn batch_writes_csv_in_file_order() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    fs::write(dir.path().join("a.txt"), PAGE).unwrap();
    fs::write(dir.path().join("b.txt"), "Entry Type Single\nVisa No. 42\n").unwrap();
    let pattern = format!("{}/*.txt", dir.path().display());
    let output = dir.path().join("out.csv");

    visa()
        .args(["-c", &config, "batch", &pattern, "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 2 rows"));

    let sheet = fs::read_to_string(&output).unwrap();
    let lines: Vec<_> = sheet.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Name,Country,Passport Number,Visa No,Valid From,Valid Until,Duration of Stay,Entry Type",
            "a,United Kingdom,AB1234567,123456,,,90,",
            "b,,,42,,,,Single",
        ]
    );
}

#[test]
fn batch_stops_on_empty_document() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    fs::write(dir.path().join("a.txt"), PAGE).unwrap();
    fs::write(dir.path().join("b.txt"), "").unwrap();
    let pattern = format!("{}/*.txt", dir.path().display());
    let output = dir.path().join("out.csv");

    visa()
        .args(["-c", &config, "batch", &pattern, "-o"])
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("b.txt"));

    assert!(!output.exists());
}

#[test]
fn batch_blank_rows_keep_empty_documents() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    fs::write(dir.path().join("a.txt"), "").unwrap();
    fs::write(dir.path().join("b.txt"), PAGE).unwrap();
    let pattern = format!("{}/*.txt", dir.path().display());
    let output = dir.path().join("out.csv");

    visa()
        .args(["-c", &config, "batch", &pattern, "--continue-on-error", "--blank-rows", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed files:"));

    let sheet = fs::read_to_string(&output).unwrap();
    let lines: Vec<_> = sheet.lines().skip(1).collect();
    assert_eq!(
        lines,
        vec!["a,,,,,,,", "b,United Kingdom,AB1234567,123456,,,90,"]
    );
}

#[test]
fn batch_writes_xlsx() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    fs::write(dir.path().join("a.txt"), PAGE).unwrap();
    let pattern = format!("{}/*.txt", dir.path().display());
    let output = dir.path().join("visas.xlsx");

    visa()
        .args(["-c", &config, "batch", &pattern, "-o"])
        .arg(&output)
        .assert()
        .success();

    let bytes = fs::read(&output).unwrap();
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn config_init_refuses_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());

    visa()
        .args(["config", "init", "-o", &config])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    visa()
        .args(["config", "init", "--force", "-o", &config])
        .assert()
        .success();
}

#[test]
fn config_set_and_get() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());

    visa()
        .args(["-c", &config, "config", "set", "normalizer.base_direction", "ltr"])
        .assert()
        .success();

    visa()
        .args(["-c", &config, "config", "get", "normalizer.base_direction"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"ltr\""));

    visa()
        .args(["-c", &config, "config", "set", "output.sheet_name", "\"\""])
        .assert()
        .failure();
}

#[test]
fn logs_go_to_stderr_and_honour_rust_log() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    let input = dir.path().join("john_smith.txt");
    fs::write(&input, PAGE).unwrap();

    let assert = visa()
        .env("RUST_LOG", "debug")
        .args(["-c", &config, "process"])
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("Parsed john_smith.txt"));

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let record: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(record["visa_no"], "123456");
}
