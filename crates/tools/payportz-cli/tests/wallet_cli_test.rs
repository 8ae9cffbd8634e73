use assert_cmd::prelude::*;
use axum::extract::Query;
use axum::routing::{get, post};
use axum::{Json, Router};
use predicates::prelude::*;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{tempdir, TempDir};

/// Serve a minimal Bread API on a background runtime and return its URL.
fn spawn_bread_stub() -> String {
    let app = Router::new()
        .route(
            "/banks",
            get(|| async { Json(json!({"data": [{"name": "Access Bank", "code": "044"}]})) }),
        )
        .route(
            "/rate/offramp",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                let rate = if q.get("currency").map(String::as_str) == Some("NGN") { 1580.0 } else { 0.0 };
                Json(json!({"data": {"rate": rate}}))
            }),
        )
        .route(
            "/swap",
            post(|Json(body): Json<Value>| async move {
                Json(json!({"data": {"hash": format!("0xswap-{}", body["wallet_id"].as_str().unwrap_or("")), "link": null}}))
            }),
        )
        .route(
            "/offramp",
            post(|Json(body): Json<Value>| async move {
                Json(json!({"data": {"reference": format!("off-{}", body["beneficiary_id"].as_str().unwrap_or(""))}}))
            }),
        );

    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });
    format!("http://{}", rx.recv().unwrap())
}

fn setup(base_url: &str, wallet_id: &str) -> (TempDir, PathBuf) {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("payportz.toml");
    let config = format!(
        "[storage]\nbackend = \"memory\"\n\n[bread]\nbase_url = \"{}\"\napi_key = \"k\"\nwallet_id = \"{}\"\ntimeout_secs = 5\n",
        base_url, wallet_id
    );
    fs::write(&config_path, config).unwrap();
    (temp_dir, config_path)
}

fn payportz(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("payportz").unwrap();
    cmd.arg("--config")
        .arg(config)
        .env_remove("PAYPORTZ_BREAD_WALLET_ID")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_wallet_banks_and_rate() {
    let url = spawn_bread_stub();
    let (_dir, config) = setup(&url, "w-1");

    payportz(&config)
        .args(["wallet", "banks"])
        .assert()
        .success()
        .stdout(predicate::str::contains("044").and(predicate::str::contains("Access Bank")));

    payportz(&config)
        .args(["wallet", "rate", "offramp"])
        .assert()
        .success()
        .stdout(predicate::str::contains("offramp rate (NGN): 1580"));

    payportz(&config)
        .args(["wallet", "rate", "sideways"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown ramp direction"));
}

#[test]
fn test_wallet_swap_and_withdraw_use_configured_wallet() {
    let url = spawn_bread_stub();
    let (_dir, config) = setup(&url, "w-cfg");

    let output = payportz(&config)
        .args([
            "--json", "wallet", "swap",
            "--from", "base:usdc",
            "--to", "base:cngn",
            "--from-amount", "10",
            "--receiver", "0xabc",
        ])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let result: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["hash"], "0xswap-w-cfg");

    payportz(&config)
        .args(["wallet", "withdraw", "w-2", "--amount", "5", "--asset", "base:usdc", "--beneficiary", "ben-7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("off-ben-7"));

    payportz(&config)
        .args(["wallet", "swap", "--from", "base:usdc", "--to", "base:cngn", "--receiver", "0xabc"])
        .assert()
        .failure();
}

#[test]
fn test_wallet_commands_need_a_wallet() {
    let url = spawn_bread_stub();
    let (_dir, config) = setup(&url, "");

    payportz(&config)
        .args(["wallet", "withdraw", "--amount", "5", "--asset", "base:usdc", "--beneficiary", "ben-7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bread.wallet_id is not configured"));
}
