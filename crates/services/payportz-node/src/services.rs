use anyhow::Context;
use payportz_bread::BreadClient;
use payportz_config::{EscrowPolicyMode, ExecutorMode, PayportzConfig, StorageBackendKind};
use payportz_escrow::{EscrowPolicy, EscrowStore};
use payportz_multisig::{
    BlobProposalRepository, ChainExecutor, ExecutionDispatcher, ExecutorRegistry, MultisigEngine,
    ProposalRepository, SimulatedExecutor, TransferExecutor,
};
use payportz_storage::{BlobStore, FileBlobStore, MemoryBlobStore, StorageBackend};
use std::sync::Arc;
use std::time::Duration;

/// Everything the node and the CLI drive, wired from one configuration.
///
/// Logs through the `log` facade so the CLI's `env_logger` sees it too.
#[derive(Clone)]
pub struct Services {
    pub engine: Arc<MultisigEngine>,
    pub escrows: Arc<EscrowStore>,
    pub bread: BreadClient,
}

impl Services {
    pub fn from_config(config: &PayportzConfig) -> anyhow::Result<Self> {
        let backend = match config.storage.backend {
            StorageBackendKind::File => {
                StorageBackend::File(FileBlobStore::new(config.storage.data_dir.clone()))
            }
            StorageBackendKind::Memory => StorageBackend::InMemory(MemoryBlobStore::new()),
        };
        let blobs: Arc<dyn BlobStore> = Arc::new(backend);

        let bread = BreadClient::new(
            config.bread.base_url.clone(),
            config.bread.api_key.clone(),
            Duration::from_secs(config.bread.timeout_secs),
        )
        .context("Failed to build Bread API client")?;
        if config.bread.api_key.is_empty() {
            log::warn!("No Bread API key configured; transfers will be rejected");
        }

        let starknet: Arc<dyn ChainExecutor> = match config.executors.starknet.mode {
            ExecutorMode::Simulated => Arc::new(SimulatedExecutor::new(
                Duration::from_millis(config.executors.starknet.delay_ms),
                config.executors.starknet.tx_hash.clone(),
            )),
        };
        let transfers = TransferExecutor::new(
            Arc::new(bread.clone()),
            Some(config.bread.wallet_id.clone()),
        );
        let registry = ExecutorRegistry::new()
            .register("starknet", starknet)
            .with_fallback(Arc::new(transfers));

        let repository: Arc<dyn ProposalRepository> =
            Arc::new(BlobProposalRepository::new(blobs.clone()));
        let dispatcher = ExecutionDispatcher::new(repository.clone(), registry);
        let engine = MultisigEngine::new(repository, dispatcher);

        let policy = match config.escrow.policy {
            EscrowPolicyMode::Permissive => EscrowPolicy::Permissive,
            EscrowPolicyMode::Strict => EscrowPolicy::Strict,
        };
        let escrows = EscrowStore::new(blobs, policy);

        log::debug!(
            "Services wired: {:?} storage at {}, {} escrow policy",
            config.storage.backend,
            config.storage.data_dir.display(),
            policy
        );

        Ok(Self {
            engine: Arc::new(engine),
            escrows: Arc::new(escrows),
            bread,
        })
    }
}
