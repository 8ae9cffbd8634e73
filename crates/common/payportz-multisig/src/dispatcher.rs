use chrono::Utc;
use std::sync::Arc;

use crate::error::{ExecutionError, MultisigError};
use crate::executor::ExecutorRegistry;
use crate::proposal::{Proposal, ProposalState, TxReceipt};
use crate::storage::ProposalRepository;

/// Routes approved proposals to the executor registered for their chain and
/// records the outcome on the proposal.
#[derive(Clone)]
pub struct ExecutionDispatcher {
    repository: Arc<dyn ProposalRepository>,
    registry: ExecutorRegistry,
}

impl ExecutionDispatcher {
    pub fn new(repository: Arc<dyn ProposalRepository>, registry: ExecutorRegistry) -> Self {
        Self {
            repository,
            registry,
        }
    }

    /// Execute `proposal` and return it in a terminal state.
    ///
    /// The `executing` state is persisted before the executor is called, and the
    /// terminal state after it returns. Executor failures become `failed`
    /// proposals; only storage errors are returned as `Err`.
    pub async fn execute(&self, mut proposal: Proposal) -> Result<Proposal, MultisigError> {
        proposal.state = ProposalState::Executing;
        self.repository.update(&proposal).await?;

        let chain = proposal.chain_currency.chain().to_string();
        log::info!("Executing proposal {} on chain '{}'", proposal.id, chain);

        let outcome = self.run(&proposal, &chain).await;
        let executed_at = Utc::now();
        proposal.state = match outcome {
            Ok(tx) => {
                log::info!("Proposal {} executed, tx {}", proposal.id, tx.hash);
                ProposalState::Executed { tx, executed_at }
            }
            Err(e) => {
                log::warn!("Proposal {} failed: {}", proposal.id, e);
                ProposalState::Failed {
                    error: e.to_string(),
                    executed_at: Some(executed_at),
                }
            }
        };

        self.repository.update(&proposal).await?;
        Ok(proposal)
    }

    async fn run(&self, proposal: &Proposal, chain: &str) -> Result<TxReceipt, ExecutionError> {
        let executor = self
            .registry
            .resolve(chain)
            .ok_or_else(|| ExecutionError::NoExecutor(chain.to_string()))?;
        log::debug!("Using {} executor for proposal {}", executor.name(), proposal.id);
        executor.execute(proposal).await
    }
}
