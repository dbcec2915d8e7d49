// Integration tests for `tapcheck check` and `tapcheck config`.
// Run with: cargo test -p tapcheck-cli --test check_tests -- --nocapture

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const HEADER: &str = "Receipt document number;Category;Product;Issue date;Quantity sold";

/// Command with its own settings file so the user's config never leaks in.
fn tapcheck(dir: &Path, settings: &str) -> Command {
    let config = dir.join("settings.toml");
    std::fs::write(&config, settings).unwrap();
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tapcheck"));
    cmd.current_dir(dir);
    cmd.env_remove("TAPCHECK_LOG");
    cmd.env_remove("TAPCHECK_CONFIG");
    cmd.arg("--config").arg(config);
    cmd
}

fn write_csv(dir: &Path, name: &str, rows: &[&str]) -> PathBuf {
    let mut content = String::from(HEADER);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    content.push('\n');
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ---------------------------------------------------------------------------
// check: outcomes
// ---------------------------------------------------------------------------

#[test]
fn all_matched_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_csv(
        dir.path(),
        "ok.csv",
        &[
            "R1;Pivovar Premium;Beer A;2026-02-06 10:00:00;2",
            "R1;PET láhve;Láhev 1 l;2026-02-06 10:00:00;2",
        ],
    );

    let output = tapcheck(dir.path(), "").arg("check").arg(&file).output().unwrap();

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.trim_end().ends_with("Checked 1 receipts. All beer vs bottles match."));
    assert!(!out.contains("====="));
}

#[test]
fn mismatch_exits_one_with_card() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_csv(
        dir.path(),
        "bad.csv",
        &[
            "R1;Pivovar Test;Beer;2026-02-06 10:00:00;1",
            "R1;PET láhve;Láhev 0,5 l;2026-02-06 10:00:00;1",
        ],
    );

    let output = tapcheck(dir.path(), "").arg("check").arg(&file).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.starts_with("Checked 1 receipts. Found 1 mismatches.\n"));
    assert!(out.contains("===== Receipt R1 ====="));
    assert!(out.contains("Difference: -0.50L"));
    // summary, blank line, two remark lines
    let after_summary = out.split("Bottles: 0.50L x1\n").nth(1).unwrap();
    assert!(after_summary.starts_with('\n'));
    assert_eq!(after_summary.trim().lines().count(), 2);
    assert!(!stderr(&output).contains("error:"));
}

#[test]
fn no_snark_prints_summary_only() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_csv(dir.path(), "bad.csv", &["R1;Pivovar Test;Beer;;1"]);

    let output = tapcheck(dir.path(), "")
        .args(["check", "--no-snark"])
        .arg(&file)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).trim_end().ends_with("Bottles: -"));
}

#[test]
fn nothing_to_check_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_csv(dir.path(), "snacks.csv", &["R1;Snacks;Chips;;1"]);

    let output = tapcheck(dir.path(), "").arg("check").arg(&file).output().unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output).trim(), "No matching beer/PET rows found.");
}

#[test]
fn json_report() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_csv(
        dir.path(),
        "bad.csv",
        &[
            "R1;Pivovar Test;Beer;2026-02-06 10:00:00;1",
            "R1;PET láhve;Láhev 0,5 l;2026-02-06 10:00:00;1",
            "R2;Pivovar Test;Beer;;1",
            "R2;PET láhve;Láhev 1 l;;1",
        ],
    );

    let output = tapcheck(dir.path(), "")
        .args(["check", "--json"])
        .arg(&file)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid JSON");
    assert_eq!(report["total_receipts"], 2);
    assert_eq!(report["mismatch_count"], 1);
    assert_eq!(report["receipts"][0]["receipt_no"], "R1");
    assert_eq!(report["receipts"][0]["diff_ml"], -500);
    assert_eq!(report["receipts"][0]["bottles"][0]["size_ml"], 500);
    assert_eq!(report["receipts"][1]["matched"], true);
    assert!(report["receipts"][1]["issued_at"].is_null());
}

#[test]
fn budget_flag_truncates() {
    let dir = tempfile::tempdir().unwrap();
    let rows: Vec<String> = (0..20).map(|i| format!("R{i:02};Pivovar;Beer;;1")).collect();
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
    let file = write_csv(dir.path(), "many.csv", &rows);

    let output = tapcheck(dir.path(), "")
        .args(["check", "--no-snark", "--budget", "300"])
        .arg(&file)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.starts_with("Checked 20 receipts. Found 20 mismatches."));
    assert!(out.trim_end().ends_with("...truncated"));
    assert!(!out.contains("Receipt R19 "));
}

// ---------------------------------------------------------------------------
// check: failures
// ---------------------------------------------------------------------------

#[test]
fn missing_file_argument_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = tapcheck(dir.path(), "").arg("check").output().unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).is_empty());
}

#[test]
fn unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("notes.txt");
    std::fs::write(&file, "x").unwrap();

    let output = tapcheck(dir.path(), "").arg("check").arg(&file).output().unwrap();

    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("error: unsupported file type: .txt"));
    assert!(stdout(&output).is_empty());
}

#[test]
fn missing_columns_show_generic_message() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("cols.csv");
    std::fs::write(&file, "Receipt document number;Product\nR1;Beer\n").unwrap();

    let output = tapcheck(dir.path(), "").arg("check").arg(&file).output().unwrap();

    assert_eq!(output.status.code(), Some(6));
    let err = stderr(&output);
    assert!(err.contains("error: Failed to process the file."));
    // detail is logged at error level
    assert!(err.contains("missing required columns: Category, Issue date, Quantity sold"));
}

#[test]
fn bad_row_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_csv(
        dir.path(),
        "row.csv",
        &["R1;Pivovar;Beer;;1", "R1;PET láhve;Láhev 1 l;;1,5"],
    );

    let output = tapcheck(dir.path(), "").arg("check").arg(&file).output().unwrap();

    assert_eq!(output.status.code(), Some(7));
    assert!(stderr(&output).contains("expected whole number"));
}

#[test]
fn file_too_large() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_csv(dir.path(), "big.csv", &["R1;Pivovar;Beer;;1"]);
    let size = std::fs::metadata(&file).unwrap().len();

    let output = tapcheck(dir.path(), "max_file_bytes = 10\n")
        .arg("check")
        .arg(&file)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains(&format!(
        "error: file is too large ({size} bytes). Max allowed is 10 bytes."
    )));
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = tapcheck(dir.path(), "")
        .args(["check", "absent.csv"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(5));
    assert!(stderr(&output).contains("error: Failed to process the file."));
}

// ---------------------------------------------------------------------------
// settings
// ---------------------------------------------------------------------------

#[test]
fn header_names_from_settings() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("custom.csv");
    std::fs::write(
        &file,
        "Doc;Cat;Item;When;Qty\nR1;Pivovar;Beer;;1\nR1;PET láhve;Láhev 1 l;;1\n",
    )
    .unwrap();
    let settings = r#"
[columns]
receipt = ["Doc"]
category = ["Cat"]
product = ["Item"]
issued_at = ["When"]
quantity = ["Qty"]
"#;

    let output = tapcheck(dir.path(), settings).arg("check").arg(&file).output().unwrap();

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
}

#[test]
fn invalid_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = tapcheck(dir.path(), "timeout_secs = \"soon\"\n")
        .arg("config")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(10));
    assert!(stderr(&output).contains("error: invalid settings in "));
}

#[test]
fn config_prints_effective_settings() {
    let dir = tempfile::tempdir().unwrap();
    let output = tapcheck(dir.path(), "message_budget = 1200\n")
        .arg("config")
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.starts_with("# "));
    assert!(out.contains("settings.toml"));
    assert!(out.contains("message_budget = 1200"));
    assert!(out.contains("timeout_secs = 120"));
    assert!(out.contains("Prodané množství"));
}
