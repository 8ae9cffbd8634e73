use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::asset::{Amount, ChainCurrency};
use crate::error::ExecutionError;
use crate::proposal::{Proposal, TxReceipt};

/// Placeholder hash reported by the simulated Starknet executor.
pub const SIMULATED_TX_HASH: &str = "0xmockstarknettx";

/// Delay the simulated executor waits before reporting success.
pub const SIMULATED_DELAY: Duration = Duration::from_millis(1000);

/// Performs the transfer described by an approved proposal on one chain family.
#[async_trait]
pub trait ChainExecutor: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Execute the proposal's transfer
    async fn execute(&self, proposal: &Proposal) -> Result<TxReceipt, ExecutionError>;
}

/// The external transfer API consumed by `TransferExecutor`.
#[async_trait]
pub trait TransferApi: Send + Sync {
    /// Move `amount` of `asset` from `wallet_id` to `recipient`
    async fn transfer(
        &self,
        wallet_id: &str,
        amount: Amount,
        recipient: &str,
        asset: &ChainCurrency,
    ) -> Result<TxReceipt, ExecutionError>;
}

/// Stand-in for a relayer integration: waits, then reports a fixed hash.
/// No chain call is made.
#[derive(Debug, Clone)]
pub struct SimulatedExecutor {
    delay: Duration,
    tx_hash: String,
}

impl SimulatedExecutor {
    pub fn new(delay: Duration, tx_hash: impl Into<String>) -> Self {
        Self {
            delay,
            tx_hash: tx_hash.into(),
        }
    }
}

impl Default for SimulatedExecutor {
    fn default() -> Self {
        Self::new(SIMULATED_DELAY, SIMULATED_TX_HASH)
    }
}

#[async_trait]
impl ChainExecutor for SimulatedExecutor {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn execute(&self, proposal: &Proposal) -> Result<TxReceipt, ExecutionError> {
        log::debug!(
            "Simulating {} {} to {} for proposal {}",
            proposal.amount,
            proposal.chain_currency,
            proposal.recipient,
            proposal.id
        );
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(TxReceipt::new(self.tx_hash.clone()))
    }
}

/// Executes proposals through the external transfer API from a configured wallet.
#[derive(Clone)]
pub struct TransferExecutor {
    api: Arc<dyn TransferApi>,
    wallet_id: Option<String>,
}

impl TransferExecutor {
    pub fn new(api: Arc<dyn TransferApi>, wallet_id: Option<String>) -> Self {
        let wallet_id = wallet_id.filter(|w| !w.trim().is_empty());
        Self { api, wallet_id }
    }
}

#[async_trait]
impl ChainExecutor for TransferExecutor {
    fn name(&self) -> &str {
        "transfer-api"
    }

    async fn execute(&self, proposal: &Proposal) -> Result<TxReceipt, ExecutionError> {
        let wallet_id = self.wallet_id.as_deref().ok_or(ExecutionError::MissingWallet)?;
        self.api
            .transfer(
                wallet_id,
                proposal.amount,
                &proposal.recipient,
                &proposal.chain_currency,
            )
            .await
    }
}

/// Chain executors keyed by chain tag, with an optional fallback for
/// chains that have no dedicated executor.
#[derive(Clone, Default)]
pub struct ExecutorRegistry {
    executors: HashMap<String, Arc<dyn ChainExecutor>>,
    fallback: Option<Arc<dyn ChainExecutor>>,
}

impl ExecutorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `executor` for `chain` (matched case-insensitively)
    pub fn register(mut self, chain: &str, executor: Arc<dyn ChainExecutor>) -> Self {
        self.executors.insert(chain.to_lowercase(), executor);
        self
    }

    /// Executor used for chains without a dedicated entry
    pub fn with_fallback(mut self, executor: Arc<dyn ChainExecutor>) -> Self {
        self.fallback = Some(executor);
        self
    }

    /// Executor for `chain`. A registered name also covers chains it
    /// prefixes (`starknet` serves `starknet-sepolia`); the longest
    /// matching name wins.
    pub fn resolve(&self, chain: &str) -> Option<Arc<dyn ChainExecutor>> {
        let chain = chain.to_lowercase();
        self.executors
            .iter()
            .filter(|(family, _)| chain.starts_with(family.as_str()))
            .max_by_key(|(family, _)| family.len())
            .map(|(_, executor)| executor)
            .or(self.fallback.as_ref())
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proposal::ProposalState;
    use chrono::Utc;
    use std::sync::Mutex;

    struct RecordingApi {
        calls: Mutex<Vec<(String, f64, String, String)>>,
    }

    #[async_trait]
    impl TransferApi for RecordingApi {
        async fn transfer(
            &self,
            wallet_id: &str,
            amount: Amount,
            recipient: &str,
            asset: &ChainCurrency,
        ) -> Result<TxReceipt, ExecutionError> {
            self.calls.lock().unwrap().push((
                wallet_id.to_string(),
                amount.value(),
                recipient.to_string(),
                asset.to_string(),
            ));
            Ok(TxReceipt {
                hash: "0xbread".to_string(),
                link: Some("https://basescan.org/tx/0xbread".to_string()),
            })
        }
    }

    fn proposal(chain_currency: &str) -> Proposal {
        Proposal {
            id: "ms_1_aaaaaa".to_string(),
            creator: "guest".to_string(),
            chain_currency: chain_currency.parse().unwrap(),
            amount: Amount::new(100.0).unwrap(),
            recipient: "0xabc".to_string(),
            signers: vec!["a".to_string(), "b".to_string()],
            threshold: 2,
            approvals: vec!["a".to_string(), "b".to_string()],
            state: ProposalState::Executing,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_simulated_executor_reports_placeholder_hash() {
        let executor = SimulatedExecutor::new(Duration::ZERO, SIMULATED_TX_HASH);
        let tx = executor.execute(&proposal("starknet:usdc")).await.unwrap();
        assert_eq!(tx.hash, "0xmockstarknettx");
        assert_eq!(tx.link, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_executor_waits() {
        let executor = SimulatedExecutor::default();
        let started = tokio::time::Instant::now();
        executor.execute(&proposal("starknet:usdc")).await.unwrap();
        assert!(started.elapsed() >= SIMULATED_DELAY);
    }

    #[tokio::test]
    async fn test_transfer_executor_calls_api() {
        let api = Arc::new(RecordingApi { calls: Mutex::new(vec![]) });
        let executor = TransferExecutor::new(api.clone(), Some("wallet-1".to_string()));

        let tx = executor.execute(&proposal("base:usdc")).await.unwrap();
        assert_eq!(tx.hash, "0xbread");

        let calls = api.calls.lock().unwrap();
        assert_eq!(
            calls.as_slice(),
            &[("wallet-1".to_string(), 100.0, "0xabc".to_string(), "base:usdc".to_string())]
        );
    }

    #[tokio::test]
    async fn test_transfer_executor_requires_wallet() {
        let api = Arc::new(RecordingApi { calls: Mutex::new(vec![]) });
        let executor = TransferExecutor::new(api.clone(), Some("  ".to_string()));
        let err = executor.execute(&proposal("base:usdc")).await.unwrap_err();
        assert_eq!(err, ExecutionError::MissingWallet);
        assert!(api.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_registry_resolution() {
        let simulated: Arc<dyn ChainExecutor> = Arc::new(SimulatedExecutor::default());
        let registry = ExecutorRegistry::new().register("Starknet", simulated);
        assert_eq!(registry.resolve("starknet").unwrap().name(), "simulated");
        assert!(registry.resolve("base").is_none());

        let api = Arc::new(RecordingApi { calls: Mutex::new(vec![]) });
        let registry = registry.with_fallback(Arc::new(TransferExecutor::new(api, None)));
        assert_eq!(registry.resolve("base").unwrap().name(), "transfer-api");
        assert_eq!(registry.resolve("starknet").unwrap().name(), "simulated");
    }

    #[test]
    fn test_registry_matches_chain_family() {
        let simulated: Arc<dyn ChainExecutor> = Arc::new(SimulatedExecutor::default());
        let api = Arc::new(RecordingApi { calls: Mutex::new(vec![]) });
        let registry = ExecutorRegistry::new()
            .register("starknet", simulated)
            .with_fallback(Arc::new(TransferExecutor::new(api, None)));

        assert_eq!(registry.resolve("starknet-sepolia").unwrap().name(), "simulated");
        assert_eq!(registry.resolve("StarknetMainnet").unwrap().name(), "simulated");
        assert_eq!(registry.resolve("stark").unwrap().name(), "transfer-api");
        assert_eq!(registry.resolve("base").unwrap().name(), "transfer-api");
    }
}
