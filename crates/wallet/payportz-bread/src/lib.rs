//! Client for the Bread wallet and transfer API.
//!
//! Covers wallets and balances, transfers and swaps, fiat ramp quotes and
//! rates, offramps to bank accounts, bank lookup and deposit automation.
//! `BreadClient` also implements the multisig `TransferApi`, so it can back
//! a `TransferExecutor` directly.

pub mod client;
pub mod error;
pub mod types;

pub use client::{BreadClient, DEFAULT_BASE_URL, DEFAULT_FIAT_CURRENCY, DEFAULT_TIMEOUT};
pub use error::BreadError;
pub use types::{
    AccountDetails, AutomationSettings, Balance, Bank, Blockchain, BreadWallet, OfframpReceipt,
    OfframpStatus, Quote, RampDirection, Rate, SwapRequest, TransferResult, WalletAddress,
    WalletPage,
};
