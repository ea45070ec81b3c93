use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use chrono::{Datelike, Local};
use predicates::prelude::*;
use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
    config: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("config.json");
        let body = serde_json::json!({
            "storage": {
                "upload_dir": dir.path().join("uploads"),
                "ledger_file": dir.path().join("receipts.json"),
            }
        });
        fs::write(&config, body.to_string()).unwrap();
        Self { dir, config }
    }

    fn inbox_file(&self, name: &str, contents: &[u8]) -> PathBuf {
        let inbox = self.dir.path().join("inbox");
        fs::create_dir_all(&inbox).unwrap();
        let path = inbox.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn uploads(&self) -> PathBuf {
        self.dir.path().join("uploads")
    }

    fn rcpt(&self) -> Command {
        let mut cmd = Command::cargo_bin("rcpt").unwrap();
        cmd.arg("--config").arg(&self.config);
        cmd
    }

    fn ledger(&self) -> serde_json::Value {
        let content = fs::read_to_string(self.dir.path().join("receipts.json")).unwrap();
        serde_json::from_str(&content).unwrap()
    }
}

const WALMART: &str = "WALMART SUPERCENTER\nStore #4521\n03/15/2023 10:41\nSubtotal 10.00\nTax 1.00\nTotal 11.00\n";

#[test]
fn process_files_receipt_under_purchase_year() {
    let ws = Workspace::new();
    let input = ws.inbox_file("walmart.txt", WALMART.as_bytes());

    ws.rcpt()
        .arg("process")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""merchant_name": "Walmart""#))
        .stdout(predicate::str::contains(r#""total_amount": "11.00""#))
        .stdout(predicate::str::contains(r#""purchased_at": "03/15/2023""#));

    let filed = ws.uploads().join("2023").join("walmart.txt");
    assert!(filed.exists());
    assert!(!input.exists());

    let ledger = ws.ledger();
    assert_eq!(ledger["receipts"][0]["merchant_name"], "Walmart");
    assert_eq!(ledger["files"][0]["is_processed"], true);
    assert_eq!(Path::new(ledger["files"][0]["file_path"].as_str().unwrap()), filed);
}

#[test]
fn process_without_date_files_under_current_year() {
    let ws = Workspace::new();
    let input = ws.inbox_file("diner.txt", b"Joe's Diner\nBalance 18.40\n");

    ws.rcpt()
        .args(["process", "--format", "text"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Merchant: Joe'S Diner"))
        .stdout(predicate::str::contains("Total:    18.40"))
        .stdout(predicate::str::contains("Could not extract purchase date"));

    let year = Local::now().year().to_string();
    assert!(ws.uploads().join(year).join("diner.txt").exists());
}

#[test]
fn unrecognizable_text_still_produces_a_receipt() {
    let ws = Workspace::new();
    let input = ws.inbox_file("noise.txt", b"12345\n#@!\n");

    ws.rcpt()
        .args(["process", "--no-file"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""merchant_name": null"#))
        .stdout(predicate::str::contains(r#""total_amount": null"#))
        .stdout(predicate::str::contains(r#""purchased_at": null"#));

    assert!(input.exists());
}

#[test]
fn process_rejects_invalid_pdf() {
    let ws = Workspace::new();
    let input = ws.inbox_file("broken.pdf", b"this is not a pdf");

    ws.rcpt()
        .arg("process")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("File is not valid"));

    let ledger = ws.ledger();
    assert_eq!(ledger["files"][0]["is_valid"], false);
    assert!(ledger["files"][0]["invalid_reason"].is_string());
    assert_eq!(ledger["receipts"].as_array().unwrap().len(), 0);
    assert!(input.exists());
}

#[test]
fn process_rejects_unsupported_extension() {
    let ws = Workspace::new();
    let input = ws.inbox_file("receipt.png", b"\x89PNG");

    ws.rcpt()
        .arg("process")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format: png"));
}

#[test]
fn batch_writes_summary_and_continues_on_error() {
    let ws = Workspace::new();
    ws.inbox_file("a.txt", WALMART.as_bytes());
    ws.inbox_file("b.txt", b"STARBUCKS #221\n15-06-2022\nAmount 6.45\n");
    ws.inbox_file("c.pdf", b"garbage");
    let out = ws.dir.path().join("out");
    let pattern = ws.dir.path().join("inbox").join("*");

    ws.rcpt()
        .arg("batch")
        .arg(pattern.to_str().unwrap())
        .arg("--output-dir")
        .arg(&out)
        .args(["--summary", "--continue-on-error"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 3 files"));

    assert!(ws.uploads().join("2023").join("a.txt").exists());
    assert!(ws.uploads().join("2022").join("b.txt").exists());
    assert!(out.join("b.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.contains("Starbucks"));
    assert!(summary.contains("c.pdf,error"));
}

#[test]
fn receipts_list_and_show() {
    let ws = Workspace::new();
    let input = ws.inbox_file("target.txt", b"TARGET\n1 January 2024\nTotal 42.00\n");

    ws.rcpt().args(["process", "--no-file"]).arg(&input).assert().success();

    ws.rcpt()
        .args(["receipts", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Target"))
        .stdout(predicate::str::contains("42.00"));

    ws.rcpt()
        .args(["receipts", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""category": "Retail""#));

    ws.rcpt()
        .args(["receipts", "show", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("receipt not found: 7"));
}

#[test]
fn merchants_lists_table_in_priority_order() {
    let ws = Workspace::new();

    let output = ws.rcpt().arg("merchants").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let cheesecake = stdout.find("cheesecake factory").unwrap();
    let depot = stdout.find("home depot").unwrap();
    assert!(cheesecake < depot);
}

#[test]
fn config_get_reads_nested_key() {
    let ws = Workspace::new();

    ws.rcpt()
        .args(["config", "get", "pdf.allowed_extensions"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"txt\""));
}
