// Two writers that each load the whole proposal list, change it and write it
// back will overwrite one another. One engine serialises its own callers;
// nothing coordinates separate engines or processes.

use payportz_multisig::{BlobProposalRepository, ProposalRepository, ProposalRequest};
use payportz_node::Services;
use payportz_config::{PayportzConfig, StorageBackendKind};
use payportz_storage::{BlobStore, FileBlobStore};
use std::sync::Arc;
use tempfile::TempDir;

fn config_for(dir: &TempDir) -> PayportzConfig {
    let mut config = PayportzConfig::default();
    config.storage.backend = StorageBackendKind::File;
    config.storage.data_dir = dir.path().to_path_buf();
    config.executors.starknet.delay_ms = 0;
    config
}

fn request() -> ProposalRequest {
    ProposalRequest {
        signers: "alice,bob,carol".to_string(),
        threshold: 3,
        chain_currency: "starknet:usdc".to_string(),
        amount: 10.0,
        recipient: "0xabc".to_string(),
        creator: None,
    }
}

#[tokio::test]
async fn test_second_stale_write_wins() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let services = Services::from_config(&config_for(&dir))?;
    let proposal = services.engine.create_proposal(&request()).await?;

    let blobs: Arc<dyn BlobStore> = Arc::new(FileBlobStore::new(dir.path()));
    let tab_one = BlobProposalRepository::new(blobs.clone());
    let tab_two = BlobProposalRepository::new(blobs);

    let mut seen_by_one = tab_one.load().await?;
    let mut seen_by_two = tab_two.load().await?;
    seen_by_one[0].approvals.push("alice".to_string());
    seen_by_two[0].approvals.push("bob".to_string());

    tab_one.save(&seen_by_one).await?;
    tab_two.save(&seen_by_two).await?;

    let stored = services.engine.get(&proposal.id).await?;
    assert_eq!(stored.approvals, vec!["bob"]);
    Ok(())
}

#[tokio::test]
async fn test_one_engine_keeps_every_approval() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let services = Services::from_config(&config_for(&dir))?;
    let proposal = services.engine.create_proposal(&request()).await?;

    let approvals = ["alice", "bob"].map(|signer| {
        let engine = services.engine.clone();
        let id = proposal.id.clone();
        tokio::spawn(async move { engine.approve(&id, signer).await })
    });
    for handle in approvals {
        handle.await??;
    }

    let stored = services.engine.get(&proposal.id).await?;
    assert_eq!(stored.approvals.len(), 2);
    assert!(stored.has_approved("alice"));
    assert!(stored.has_approved("bob"));
    Ok(())
}
