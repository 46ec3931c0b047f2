use anyhow::Result;
use serde_json::json;
use std::process::{Command, Output};
use tempfile::TempDir;

const SAVED: &str = "The file was saved!\n";

fn setup() -> Result<TempDir> {
    let temp_dir = TempDir::new()?;
    std::fs::write(
        temp_dir.path().join("states.json"),
        r#"[{"name":"Texas","abbreviation":"TX"},{"name":"Ohio","abbreviation":"OH"}]"#,
    )?;
    std::fs::write(
        temp_dir.path().join("cities.json"),
        r#"{"Texas":["Austin","Dallas"]}"#,
    )?;
    Ok(temp_dir)
}

fn run_in(dir: &TempDir, args: &[&str]) -> Result<Output> {
    let output = Command::new(env!("CARGO_BIN_EXE_state-city-join"))
        .args(args)
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .output()?;
    Ok(output)
}

fn expected_records() -> serde_json::Value {
    json!([
        {"name": "Texas", "abbreviation": "TX", "cities": ["Austin", "Dallas"]},
        {"name": "Ohio", "abbreviation": "OH"}
    ])
}

#[test]
fn test_plain_run_prints_records_then_saved_message() -> Result<()> {
    let temp_dir = setup()?;

    let output = run_in(&temp_dir, &[])?;

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout)?;
    let records = stdout
        .strip_suffix(SAVED)
        .expect("saved message should be the last stdout line");
    let printed: serde_json::Value = serde_json::from_str(records)?;
    assert_eq!(printed, expected_records());

    let written = std::fs::read_to_string(temp_dir.path().join("newStates.json"))?;
    assert_eq!(
        written,
        r#"[{"name":"Texas","abbreviation":"TX","cities":["Austin","Dallas"]},{"name":"Ohio","abbreviation":"OH"}]"#
    );

    Ok(())
}

#[test]
fn test_write_failure_still_exits_zero() -> Result<()> {
    let temp_dir = setup()?;
    std::fs::create_dir(temp_dir.path().join("newStates.json"))?;

    let output = run_in(&temp_dir, &[])?;

    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8(output.stdout)?;
    assert!(!stdout.contains("The file was saved!"));
    let printed: serde_json::Value = serde_json::from_str(&stdout)?;
    assert_eq!(printed, expected_records());

    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("Failed to write newStates.json"));

    Ok(())
}

#[test]
fn test_quiet_run_prints_only_saved_message() -> Result<()> {
    let temp_dir = setup()?;

    let output = run_in(&temp_dir, &["--quiet"])?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8(output.stdout)?, SAVED);
    assert!(temp_dir.path().join("newStates.json").exists());

    Ok(())
}

#[test]
fn test_missing_input_exits_non_zero() -> Result<()> {
    let temp_dir = setup()?;
    std::fs::remove_file(temp_dir.path().join("cities.json"))?;

    let output = run_in(&temp_dir, &[])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("cities.json"));
    assert!(!temp_dir.path().join("newStates.json").exists());

    Ok(())
}

#[test]
fn test_toml_config_run() -> Result<()> {
    let temp_dir = setup()?;
    std::fs::write(
        temp_dir.path().join("join.toml"),
        r#"
[input]
states = "states.json"
cities = "cities.json"

[output]
path = "out/merged.json"

[join]
missing_cities = "null"
"#,
    )?;

    let output = run_in(&temp_dir, &["--config", "join.toml", "--quiet"])?;

    assert_eq!(output.status.code(), Some(0));
    let written = std::fs::read_to_string(temp_dir.path().join("out/merged.json"))?;
    assert!(written.ends_with(r#"{"name":"Ohio","abbreviation":"OH","cities":null}]"#));

    Ok(())
}
