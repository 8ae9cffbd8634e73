use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::asset::{Amount, ChainCurrency};

/// Result payload of a successful execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TxReceipt {
    /// Transaction hash reported by the executor
    pub hash: String,

    /// Explorer link, when the executor provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl TxReceipt {
    pub fn new(hash: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            link: None,
        }
    }
}

/// Lifecycle state of a proposal. Result fields only exist in the states
/// where they are meaningful.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ProposalState {
    /// Collecting approvals
    Pending,

    /// Threshold met, executor call in flight
    Executing,

    /// Executor succeeded
    Executed {
        tx: TxReceipt,
        #[serde(rename = "executedAt")]
        executed_at: DateTime<Utc>,
    },

    /// Executor failed; the proposal stays failed
    Failed {
        error: String,
        #[serde(rename = "executedAt", default, skip_serializing_if = "Option::is_none")]
        executed_at: Option<DateTime<Utc>>,
    },
}

/// Status tag of a `ProposalState`, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    Pending,
    Executing,
    Executed,
    Failed,
}

impl ProposalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Executing => "executing",
            Self::Executed => "executed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProposalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "executing" => Ok(Self::Executing),
            "executed" => Ok(Self::Executed),
            "failed" => Ok(Self::Failed),
            other => Err(format!("unknown proposal status '{}'", other)),
        }
    }
}

/// A multisig payment proposal as persisted in the proposal store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    /// Unique id, `ms_<millis>_<suffix>`
    pub id: String,

    /// Proposing user (business name, user id or "guest")
    pub creator: String,

    /// Asset to transfer, `<chain>:<token>`
    pub chain_currency: ChainCurrency,

    pub amount: Amount,

    /// Destination address or platform username
    pub recipient: String,

    /// Authorized signers, in the order they were entered
    pub signers: Vec<String>,

    /// Distinct approvals required before execution
    pub threshold: usize,

    /// Signers who have approved, in approval order
    #[serde(default)]
    pub approvals: Vec<String>,

    #[serde(flatten)]
    pub state: ProposalState,

    pub created_at: DateTime<Utc>,
}

fn same_identity(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

impl Proposal {
    pub fn status(&self) -> ProposalStatus {
        match self.state {
            ProposalState::Pending => ProposalStatus::Pending,
            ProposalState::Executing => ProposalStatus::Executing,
            ProposalState::Executed { .. } => ProposalStatus::Executed,
            ProposalState::Failed { .. } => ProposalStatus::Failed,
        }
    }

    /// Whether `signer` is in the signer list (case-insensitive).
    pub fn is_signer(&self, signer: &str) -> bool {
        self.signers.iter().any(|s| same_identity(s, signer))
    }

    /// Whether `signer` has already approved (case-insensitive).
    pub fn has_approved(&self, signer: &str) -> bool {
        self.approvals.iter().any(|s| same_identity(s, signer))
    }

    pub fn threshold_met(&self) -> bool {
        self.approvals.len() >= self.threshold
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self.state,
            ProposalState::Executed { .. } | ProposalState::Failed { .. }
        )
    }

    pub fn tx(&self) -> Option<&TxReceipt> {
        match &self.state {
            ProposalState::Executed { tx, .. } => Some(tx),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ProposalState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn executed_at(&self) -> Option<DateTime<Utc>> {
        match &self.state {
            ProposalState::Executed { executed_at, .. } => Some(*executed_at),
            ProposalState::Failed { executed_at, .. } => *executed_at,
            _ => None,
        }
    }
}
