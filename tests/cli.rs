#![cfg(feature = "cli")]

use anyhow::Result;
use serde_json::{Value, json};
use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};

fn run(args: &[&str], stdin: &str) -> Result<Output> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_ironnest"))
        .args(args)
        .env_remove("IRONNEST_KEYS")
        .env_remove("IRONNEST_OUTPUT")
        .env_remove("IRONNEST_PRETTY")
        .env_remove("IRONNEST_MODE")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    if let Some(mut input) = child.stdin.take() {
        // the child may exit before reading stdin when arguments are invalid
        let _ = input.write_all(stdin.as_bytes());
    }
    Ok(child.wait_with_output()?)
}

const RECORDS: &str = r#"[
    {"country": "US", "city": "Boston", "currency": "USD", "amount": 100},
    {"country": "FR", "city": "Paris", "currency": "EUR", "amount": 20}
]"#;

#[test]
fn groups_stdin_to_stdout() -> Result<()> {
    let out = run(&["currency", "country"], RECORDS)?;
    assert!(out.status.success());
    let doc: Value = serde_json::from_slice(&out.stdout)?;
    assert_eq!(
        doc,
        json!({
            "EUR": {"FR": [{"city": "Paris", "amount": 20}]},
            "USD": {"US": [{"city": "Boston", "amount": 100}]}
        })
    );
    Ok(())
}

#[test]
fn writes_to_an_output_file() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let file = tmp.path().join("docs/result.json");
    let out = run(
        &["--create-dirs", "-o", file.to_str().unwrap_or_default(), "city"],
        RECORDS,
    )?;
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
    let doc: Value = serde_json::from_str(&fs::read_to_string(&file)?)?;
    assert_eq!(doc["Paris"], json!([{"country": "FR", "currency": "EUR", "amount": 20}]));
    Ok(())
}

#[test]
fn fails_without_keys() -> Result<()> {
    let out = run(&[], RECORDS)?;
    assert!(!out.status.success());
    Ok(())
}

#[test]
fn fails_on_an_unknown_key() -> Result<()> {
    let out = run(&["ci"], RECORDS)?;
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("ci"));
    Ok(())
}

#[test]
fn best_effort_tolerates_a_missing_directory() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let file = tmp.path().join("fake/path.json");
    let dest = file.to_str().unwrap_or_default();

    let strict = run(&["-o", dest, "city"], RECORDS)?;
    assert!(!strict.status.success());

    let lenient = run(&["--best-effort", "-o", dest, "city"], RECORDS)?;
    assert!(lenient.status.success());
    assert!(!file.exists());
    Ok(())
}
