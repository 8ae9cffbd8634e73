use payportz_bread::BreadError;
use payportz_escrow::EscrowError;
use payportz_multisig::MultisigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Multisig(#[from] MultisigError),

    #[error("{0}")]
    Escrow(#[from] EscrowError),

    #[error("Bread API error: {0}")]
    Bread(#[from] BreadError),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("JSON Serialization Error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CliResult<T = ()> = Result<T, CliError>;
