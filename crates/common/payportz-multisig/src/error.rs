use payportz_storage::StorageError;
use thiserror::Error;

use crate::proposal::ProposalStatus;

/// Error types for proposal creation and approval
#[derive(Error, Debug)]
pub enum MultisigError {
    #[error("{0}")]
    Validation(String),

    #[error("Proposal not found: {0}")]
    NotFound(String),

    #[error("Signer '{signer}' is not authorized for proposal {proposal}")]
    Unauthorized { signer: String, proposal: String },

    #[error("Proposal {id} is {status} and no longer accepts approvals")]
    ProposalClosed { id: String, status: ProposalStatus },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl MultisigError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        MultisigError::Validation(message.into())
    }
}

/// Failure of a chain executor. Never propagated to callers of the engine;
/// the dispatcher records it on the proposal instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExecutionError {
    #[error("{0}")]
    Transfer(String),

    #[error("No executor registered for chain '{0}'")]
    NoExecutor(String),

    #[error("No wallet configured for transfers")]
    MissingWallet,
}
