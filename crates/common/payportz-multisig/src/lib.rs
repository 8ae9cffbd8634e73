//! PayPortz multisig: payment proposals that execute once enough signers approve.
//!
//! A proposal is built from a signer list and threshold, persisted through a
//! `ProposalRepository`, collects approvals through the `MultisigEngine`, and is
//! handed to the `ExecutionDispatcher` once the threshold is met.

pub mod asset;
pub mod builder;
pub mod dispatcher;
pub mod engine;
pub mod error;
pub mod executor;
pub mod proposal;
pub mod storage;

// Re-export key types
pub use asset::{Amount, ChainCurrency};
pub use builder::{build_proposal, parse_signers, ProposalRequest};
pub use dispatcher::ExecutionDispatcher;
pub use engine::{ApprovalOutcome, ApprovalResult, MultisigEngine};
pub use error::{ExecutionError, MultisigError};
pub use executor::{ChainExecutor, ExecutorRegistry, SimulatedExecutor, TransferApi, TransferExecutor};
pub use proposal::{Proposal, ProposalState, ProposalStatus, TxReceipt};
pub use storage::{BlobProposalRepository, ProposalRepository, PROPOSALS_KEY};
