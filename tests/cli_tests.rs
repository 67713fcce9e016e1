use std::io::Write;

use assert_cmd::Command;
use predicates::str::contains as str_contains;
use tempfile::{Builder, NamedTempFile, TempDir};

const CONFIG: &str = r#"{"programs":[{"id":"p1","name":"Alpha","timePoints":[{"id":"t1","name":"Kickoff","date":"2025-01-01"}]}]}"#;

#[allow(deprecated)]
fn cli_in(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("timeline").expect("timeline binary");
    cmd.current_dir(dir.path())
        .env("TIMELINE_CONFIG", dir.path().join("timeline-config.json"))
        .env("TIMELINE_EXPORT", dir.path().join("timeline-export.xlsx"))
        .env_remove("RUST_LOG");
    cmd
}

fn run_cli(script: &str) -> assert_cmd::assert::Assert {
    let dir = TempDir::new().expect("temp dir");
    cli_in(&dir).write_stdin(script.to_string()).assert()
}

fn config_file() -> NamedTempFile {
    let mut tmp = Builder::new().suffix(".json").tempfile().unwrap();
    write!(tmp, "{CONFIG}").unwrap();
    tmp.flush().unwrap();
    tmp
}

#[test]
fn cli_loads_config_and_shows_derived_conference() {
    let tmp = config_file();
    let script = format!("load {}\nquit\n", tmp.path().display());
    run_cli(&script)
        .success()
        .stdout(str_contains("Loaded 1 programs from"))
        .stdout(str_contains("Kickoff"))
        .stdout(str_contains("p1-conference"))
        .stdout(str_contains("2025-01-31"));
}

#[test]
fn cli_reports_config_validation_errors() {
    let mut tmp = Builder::new().suffix(".json").tempfile().unwrap();
    write!(tmp, r#"{{"programs":[]}}"#).unwrap();
    tmp.flush().unwrap();
    let script = format!("load {}\nquit\n", tmp.path().display());
    run_cli(&script).success().stdout(str_contains(
        "Load failed: Invalid config file format: 'programs' array is empty",
    ));
}

#[test]
fn cli_import_warns_about_skipped_rows() {
    let mut tmp = Builder::new().suffix(".csv").tempfile().unwrap();
    write!(tmp, "DATE,EVENT\n2025-02-01,Beta - Draft\n,Beta - Missing\n").unwrap();
    tmp.flush().unwrap();
    let script = format!("import {}\nquit\n", tmp.path().display());
    run_cli(&script)
        .success()
        .stdout(str_contains("Warning: Skipping row 3: missing required fields"))
        .stdout(str_contains("Imported 1 programs from"))
        .stdout(str_contains("beta-0"));
}

#[test]
fn cli_failed_import_keeps_previous_timeline() {
    let config = config_file();
    let mut sheet = Builder::new().suffix(".csv").tempfile().unwrap();
    write!(sheet, "DATE,EVENT\n2025-02-01,BadFormat\n").unwrap();
    sheet.flush().unwrap();
    let script = format!(
        "load {}\nimport {}\nshow\nquit\n",
        config.path().display(),
        sheet.path().display()
    );
    let assert = run_cli(&script).success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(output.contains("Spreadsheet import failed: Invalid EVENT format on row 2"));
    let after_failure = output
        .split("Spreadsheet import failed")
        .last()
        .unwrap_or_default();
    assert!(
        after_failure.contains("Kickoff"),
        "previous timeline should still be shown:\n{}",
        after_failure
    );
}

#[test]
fn cli_edits_a_time_point_date() {
    let tmp = config_file();
    let script = format!(
        "load {}\ndate p1 t1 March 3, 2025\ndate p1 missing 2025-01-01\nquit\n",
        tmp.path().display()
    );
    run_cli(&script)
        .success()
        .stdout(str_contains("Updated p1/t1."))
        .stdout(str_contains("2025-03-03"))
        .stdout(str_contains(
            "Error: time point 'missing' not found in program 'p1'",
        ));
}

#[test]
fn cli_exports_to_csv() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("timeline-config.json"), CONFIG).unwrap();
    let out = dir.path().join("out.csv");
    let script = format!("export {}\nquit\n", out.display());
    cli_in(&dir)
        .write_stdin(script)
        .assert()
        .success()
        .stdout(str_contains("Loaded 1 programs from"))
        .stdout(str_contains("Exported 2 rows to"));
    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.starts_with("DATE,EVENT"));
    assert!(written.contains("Alpha - Kickoff"));
    assert!(written.contains("\"January 31, 2025\",Conference"));
}

#[test]
fn cli_restore_reloads_default_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("timeline-config.json"), CONFIG).unwrap();
    cli_in(&dir)
        .write_stdin("date p1 t1 2030-01-01\nrestore\nquit\n")
        .assert()
        .success()
        .stdout(str_contains("Restored initial state."));
}

#[test]
fn cli_rejects_unknown_commands() {
    run_cli("frobnicate\nquit\n")
        .success()
        .stdout(str_contains("Unknown command. Type 'help'."));
}
