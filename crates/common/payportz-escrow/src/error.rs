use payportz_storage::StorageError;
use thiserror::Error;

use crate::model::{EscrowAction, EscrowStatus};

#[derive(Error, Debug)]
pub enum EscrowError {
    #[error("{0}")]
    Validation(String),

    #[error("not found")]
    NotFound(String),

    #[error("cannot {action} an escrow that is {from}")]
    InvalidTransition {
        from: EscrowStatus,
        action: EscrowAction,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
