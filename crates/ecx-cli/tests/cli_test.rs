use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CERTIFICATE: &str = "\
Encumbrance Certificate
Sub Registrar Office: Thiruvennainallur
1 06-Feb-2013 Document No: 145/2013
Nature: Sale Deed
Consideration Value: ரூ. 12,34,567/-
Survey No: 45/2B
Village: Thiruvennainallur, Villupuram
Name of Executant(s): 1. Anand Kumar (deceased)
Name of Claimant(s): செல்வமுத்துகுமாரசாமி
2 14-Mar-2015 Document No: 310/2015
Nature: Mortgage
Consideration Value: ரூ. 5,00,000/-
Survey No: 45/2B
Name of Executant(s): செல்வமுத்துகுமாரசாமி
Name of Claimant(s): Indian Bank
";

/// Command with an isolated config directory and no API key.
fn ecx(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ecx").unwrap();
    cmd.env("XDG_CONFIG_HOME", home)
        .env("HOME", home)
        .env_remove("GOOGLE_TRANSLATE_API_KEY");
    cmd
}

fn write_certificate(dir: &TempDir, name: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, CERTIFICATE).unwrap();
    path
}

#[test]
fn test_process_text_translates_names() {
    let dir = TempDir::new().unwrap();
    let input = write_certificate(&dir, "ec.txt");

    ecx(dir.path())
        .args(["process", "--no-remote"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Selvamuthukumarasamy"))
        .stdout(predicate::str::contains("\"tamilFragmentCount\": 2"))
        .stdout(predicate::str::contains("\"transactionDate\": \"2013-02-06\""))
        .stdout(predicate::str::contains("Anand Kumar"));
}

#[test]
fn test_process_csv_with_filter() {
    let dir = TempDir::new().unwrap();
    let input = write_certificate(&dir, "ec.txt");

    ecx(dir.path())
        .args(["process", "--no-remote", "--format", "csv", "--buyer", "indian"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("serial_no,date,transaction_date"))
        .stdout(predicate::str::contains("310/2015"))
        .stdout(predicate::str::contains("145/2013").not());
}

#[test]
fn test_process_stores_json_lines() {
    let dir = TempDir::new().unwrap();
    let input = write_certificate(&dir, "ec.txt");
    let store = dir.path().join("records.jsonl");

    ecx(dir.path())
        .args(["process", "--no-remote", "--store"])
        .arg(&store)
        .arg(&input)
        .assert()
        .success();

    let content = fs::read_to_string(&store).unwrap();
    assert_eq!(content.lines().count(), 2);
    assert!(content.contains("\"documentId\":\"ec.txt\""));
}

#[test]
fn test_process_missing_file() {
    let dir = TempDir::new().unwrap();

    ecx(dir.path())
        .args(["process", "--no-remote", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_batch_writes_summary() {
    let dir = TempDir::new().unwrap();
    write_certificate(&dir, "ec-1.txt");
    fs::write(dir.path().join("ec-2.txt"), "   \n").unwrap();
    let out = dir.path().join("out");
    let pattern = format!("{}/*.txt", dir.path().display());

    ecx(dir.path())
        .args(["batch", "--no-remote", "--summary", "--continue-on-error", "--output-dir"])
        .arg(&out)
        .arg(&pattern)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 successful"));

    assert!(out.join("ec-1.json").exists());
    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.contains("ec-1.txt,success,2,2,"));
    assert!(summary.contains("ec-2.txt,error"));
}

#[test]
fn test_config_init_and_get() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");

    ecx(dir.path())
        .args(["config", "init", "--output"])
        .arg(&config)
        .assert()
        .success();

    let content = fs::read_to_string(&config).unwrap();
    assert!(content.contains("min_populated_fields"));

    ecx(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "translation.source_lang"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"ta\""));
}
