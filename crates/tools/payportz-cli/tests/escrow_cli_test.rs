use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn test_escrow_release_without_funding() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempdir()?;
    let data_dir = temp_dir.path().join("data");
    let missing_config = temp_dir.path().join("absent.toml");

    let output = Command::cargo_bin("payportz")?
        .arg("--config")
        .arg(&missing_config)
        .arg("--data-dir")
        .arg(&data_dir)
        .args(["--json", "escrow", "create", "--amount", "100", "--recipient", "0xabc"])
        .output()?;
    assert!(output.status.success());
    let escrow: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(escrow["status"], "created");
    assert_eq!(escrow["currency"], "starknet:usdc");
    let id = escrow["id"].as_str().unwrap().to_string();

    Command::cargo_bin("payportz")?
        .arg("--config")
        .arg(&missing_config)
        .arg("--data-dir")
        .arg(&data_dir)
        .args(["escrow", "release", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("released"));

    assert!(data_dir.join("mock_escrows.json").exists());
    Ok(())
}

#[test]
fn test_strict_policy_from_config() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempdir()?;
    let config = temp_dir.path().join("payportz.toml");
    fs::write(
        &config,
        format!(
            "[storage]\ndata_dir = \"{}\"\n\n[escrow]\npolicy = \"strict\"\n",
            temp_dir.path().join("data").display()
        ),
    )?;

    let output = Command::cargo_bin("payportz")?
        .arg("--config")
        .arg(&config)
        .args(["--json", "escrow", "create", "--amount", "3", "--recipient", "0xabc"])
        .output()?;
    let escrow: Value = serde_json::from_slice(&output.stdout)?;
    let id = escrow["id"].as_str().unwrap().to_string();

    Command::cargo_bin("payportz")?
        .arg("--config")
        .arg(&config)
        .args(["escrow", "release", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot release an escrow that is created"));

    Command::cargo_bin("payportz")?
        .arg("--config")
        .arg(&config)
        .args(["escrow", "show", "esc_missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
    Ok(())
}
