use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::builder::{build_proposal, ProposalRequest};
use crate::dispatcher::ExecutionDispatcher;
use crate::error::MultisigError;
use crate::proposal::{Proposal, ProposalState};
use crate::storage::ProposalRepository;

/// What an `approve` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalResult {
    /// Approval appended, threshold not yet met
    Recorded,

    /// Signer had already approved; nothing changed
    AlreadyApproved,

    /// Approval met the threshold and the proposal was executed
    /// (the proposal's status tells whether execution succeeded)
    Dispatched,
}

/// Result of an approval together with the proposal as it now stands.
#[derive(Debug, Clone)]
pub struct ApprovalOutcome {
    pub result: ApprovalResult,
    pub proposal: Proposal,
}

/// Creates proposals, records approvals and triggers execution once a
/// proposal's threshold is met.
///
/// Every operation runs its read-modify-write cycle under a single-writer
/// lock, so concurrent callers of one engine cannot overwrite each other's
/// approvals. Writers outside the engine are not coordinated.
pub struct MultisigEngine {
    repository: Arc<dyn ProposalRepository>,
    dispatcher: ExecutionDispatcher,
    write_lock: Mutex<()>,
}

impl MultisigEngine {
    pub fn new(repository: Arc<dyn ProposalRepository>, dispatcher: ExecutionDispatcher) -> Self {
        Self {
            repository,
            dispatcher,
            write_lock: Mutex::new(()),
        }
    }

    /// Validate and persist a new proposal at the front of the list.
    pub async fn create_proposal(&self, request: &ProposalRequest) -> Result<Proposal, MultisigError> {
        let _guard = self.write_lock.lock().await;

        let mut proposals = self.repository.load().await?;
        let proposal = build_proposal(request, &proposals)?;
        proposals.insert(0, proposal.clone());
        self.repository.save(&proposals).await?;

        log::info!(
            "Created proposal {} ({} {} to {}, {}-of-{})",
            proposal.id,
            proposal.amount,
            proposal.chain_currency,
            proposal.recipient,
            proposal.threshold,
            proposal.signers.len()
        );
        Ok(proposal)
    }

    /// Record `signer_id`'s approval of `proposal_id`, executing the proposal
    /// if this approval meets its threshold.
    pub async fn approve(
        &self,
        proposal_id: &str,
        signer_id: &str,
    ) -> Result<ApprovalOutcome, MultisigError> {
        let _guard = self.write_lock.lock().await;

        let mut proposals = self.repository.load().await?;
        let idx = proposals
            .iter()
            .position(|p| p.id == proposal_id)
            .ok_or_else(|| MultisigError::NotFound(proposal_id.to_string()))?;
        let proposal = &mut proposals[idx];

        if !proposal.is_signer(signer_id) {
            return Err(MultisigError::Unauthorized {
                signer: signer_id.to_string(),
                proposal: proposal_id.to_string(),
            });
        }

        if proposal.has_approved(signer_id) {
            log::info!("Signer {} already approved proposal {}", signer_id, proposal_id);
            return Ok(ApprovalOutcome {
                result: ApprovalResult::AlreadyApproved,
                proposal: proposal.clone(),
            });
        }

        if proposal.state != ProposalState::Pending {
            return Err(MultisigError::ProposalClosed {
                id: proposal_id.to_string(),
                status: proposal.status(),
            });
        }

        proposal.approvals.push(signer_id.to_string());
        log::info!(
            "Signer {} approved proposal {} ({}/{})",
            signer_id,
            proposal_id,
            proposal.approvals.len(),
            proposal.threshold
        );

        if proposal.threshold_met() {
            // The dispatcher persists the new approval together with `executing`.
            let proposal = self.dispatcher.execute(proposal.clone()).await?;
            return Ok(ApprovalOutcome {
                result: ApprovalResult::Dispatched,
                proposal,
            });
        }

        let proposal = proposal.clone();
        self.repository.save(&proposals).await?;
        Ok(ApprovalOutcome {
            result: ApprovalResult::Recorded,
            proposal,
        })
    }

    /// All proposals, most recent first.
    pub async fn list(&self) -> Result<Vec<Proposal>, MultisigError> {
        self.repository.load().await
    }

    pub async fn get(&self, proposal_id: &str) -> Result<Proposal, MultisigError> {
        self.repository
            .load()
            .await?
            .into_iter()
            .find(|p| p.id == proposal_id)
            .ok_or_else(|| MultisigError::NotFound(proposal_id.to_string()))
    }
}
