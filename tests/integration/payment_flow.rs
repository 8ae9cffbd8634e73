// End-to-end flow over the flat-file backend: proposals and escrows are
// created through one set of services, then read back through a fresh set
// wired from the same configuration, as a restarted node would.

use payportz_config::{PayportzConfig, StorageBackendKind};
use payportz_escrow::{EscrowAction, EscrowRequest, EscrowStatus};
use payportz_multisig::{ApprovalResult, ProposalRequest, ProposalStatus};
use payportz_node::Services;
use serde_json::Value;
use tempfile::TempDir;

fn file_config(dir: &TempDir) -> PayportzConfig {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut config = PayportzConfig::default();
    config.storage.backend = StorageBackendKind::File;
    config.storage.data_dir = dir.path().to_path_buf();
    config.executors.starknet.delay_ms = 0;
    config.bread.base_url = "http://127.0.0.1:1".to_string();
    config.bread.timeout_secs = 1;
    config
}

fn read_blob(dir: &TempDir, key: &str) -> Value {
    let raw = std::fs::read_to_string(dir.path().join(format!("{}.json", key))).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[tokio::test]
async fn test_proposal_lifecycle_persists_across_restart() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let config = file_config(&dir);

    let services = Services::from_config(&config)?;
    let proposal = services
        .engine
        .create_proposal(&ProposalRequest {
            signers: "alice,bob,carol".to_string(),
            threshold: 2,
            chain_currency: "starknet:usdc".to_string(),
            amount: 100.0,
            recipient: "0xabc".to_string(),
            creator: None,
        })
        .await?;

    let first = services.engine.approve(&proposal.id, "alice").await?;
    assert_eq!(first.result, ApprovalResult::Recorded);
    assert_eq!(first.proposal.status(), ProposalStatus::Pending);
    drop(services);

    // A restarted node picks up the pending approval from disk.
    let restarted = Services::from_config(&config)?;
    let pending = restarted.engine.get(&proposal.id).await?;
    assert_eq!(pending.approvals, vec!["alice"]);

    let second = restarted.engine.approve(&proposal.id, "bob").await?;
    assert_eq!(second.result, ApprovalResult::Dispatched);
    assert_eq!(second.proposal.status(), ProposalStatus::Executed);

    let stored = read_blob(&dir, "payportz_multisigs");
    assert_eq!(stored[0]["status"], "executed");
    assert_eq!(stored[0]["tx"]["hash"], "0xmockstarknettx");
    assert_eq!(stored[0]["chainCurrency"], "starknet:usdc");
    assert!(stored[0]["executedAt"].is_string());
    assert!(stored[0].get("error").is_none());
    Ok(())
}

#[tokio::test]
async fn test_failed_transfer_stays_failed() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let services = Services::from_config(&file_config(&dir))?;
    let proposal = services
        .engine
        .create_proposal(&ProposalRequest {
            signers: "alice,bob".to_string(),
            threshold: 1,
            chain_currency: "base:usdc".to_string(),
            amount: -1.0,
            recipient: "0xabc".to_string(),
            creator: Some("acme".to_string()),
        })
        .await?;

    let outcome = services.engine.approve(&proposal.id, "alice").await?;
    assert_eq!(outcome.proposal.status(), ProposalStatus::Failed);
    // No wallet configured, so the transfer executor refuses before any call.
    assert_eq!(outcome.proposal.error(), Some("No wallet configured for transfers"));

    let stored = read_blob(&dir, "payportz_multisigs");
    assert_eq!(stored[0]["status"], "failed");
    assert_eq!(stored[0]["amount"], -1.0);
    assert!(stored[0].get("tx").is_none());
    Ok(())
}

#[tokio::test]
async fn test_escrow_and_proposals_share_a_data_dir() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let services = Services::from_config(&file_config(&dir))?;

    let escrow = services
        .escrows
        .create(&EscrowRequest {
            amount: Some(100.0),
            recipient: Some("0xabc".to_string()),
            ..Default::default()
        })
        .await?;
    let released = services.escrows.transition(&escrow.id, EscrowAction::Release).await?;
    assert_eq!(released.status, EscrowStatus::Released);

    services
        .engine
        .create_proposal(&ProposalRequest {
            signers: "a,b".to_string(),
            threshold: 2,
            chain_currency: "base:usdc".to_string(),
            amount: 1.0,
            recipient: "0xabc".to_string(),
            creator: None,
        })
        .await?;

    assert_eq!(read_blob(&dir, "mock_escrows")[0]["status"], "released");
    assert_eq!(read_blob(&dir, "payportz_multisigs").as_array().unwrap().len(), 1);
    Ok(())
}
