use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every Bread response wraps its payload in `{"data": ...}`.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: Option<T>,
}

/// Result of a transfer: the on-chain hash and an explorer link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferResult {
    pub hash: String,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WalletAddress {
    #[serde(default)]
    pub evm: String,
    #[serde(default)]
    pub svm: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreadWallet {
    pub id: String,
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub address: WalletAddress,
    #[serde(default)]
    pub transfer: bool,
    #[serde(default)]
    pub swap: bool,
    #[serde(default)]
    pub offramp: bool,
}

/// Wallet as returned by `POST /wallet`, which sometimes names the id
/// `wallet_id` and may omit the address.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawWallet {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    wallet_id: Option<String>,
    #[serde(default)]
    reference: String,
    #[serde(default)]
    is_active: bool,
    #[serde(default)]
    address: Option<WalletAddress>,
    #[serde(default)]
    transfer: bool,
    #[serde(default)]
    swap: bool,
    #[serde(default)]
    offramp: bool,
}

impl From<RawWallet> for BreadWallet {
    fn from(raw: RawWallet) -> Self {
        BreadWallet {
            id: raw.id.or(raw.wallet_id).unwrap_or_default(),
            reference: raw.reference,
            is_active: raw.is_active,
            address: raw.address.unwrap_or_default(),
            transfer: raw.transfer,
            swap: raw.swap,
            offramp: raw.offramp,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Blockchain {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

/// Balance of one asset in a wallet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub blockchain: Blockchain,
    #[serde(default)]
    pub balance: f64,
    #[serde(default)]
    pub available: f64,
    #[serde(default)]
    pub debt: f64,
}

/// One page of `GET /wallets`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WalletPage {
    #[serde(default)]
    pub wallets: Vec<BreadWallet>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
}

/// Direction of a fiat ramp: `onramp` buys crypto with fiat, `offramp`
/// sells crypto into a bank account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RampDirection {
    Onramp,
    Offramp,
}

impl RampDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            RampDirection::Onramp => "onramp",
            RampDirection::Offramp => "offramp",
        }
    }
}

impl fmt::Display for RampDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RampDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "onramp" | "deposit" => Ok(RampDirection::Onramp),
            "offramp" | "withdraw" => Ok(RampDirection::Offramp),
            other => Err(format!("unknown ramp direction '{}', expected onramp or offramp", other)),
        }
    }
}

/// Priced quote for converting between fiat and an asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(rename = "type")]
    pub direction: RampDirection,
    #[serde(default)]
    pub fee: f64,
    #[serde(default)]
    pub expiry: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub rate: f64,
    #[serde(default)]
    pub input_amount: f64,
    #[serde(default)]
    pub output_amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rate {
    pub rate: f64,
}

/// Parameters of a swap. Give `from_amount` to sell an exact amount or
/// `to_amount` to buy one; unset amounts are left out of the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwapRequest {
    pub from_asset: String,
    pub to_asset: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_amount: Option<f64>,
}

/// Handle of a submitted offramp, used to poll its status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfframpReceipt {
    pub reference: String,
}

/// Offramp progress. The API's payload varies by provider, so fields
/// beyond `reference` and `status` are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfframpStatus {
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bank {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub icon: String,
}

/// Bank account as resolved by `POST /lookup`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountDetails {
    pub bank_code: String,
    #[serde(default)]
    pub bank_name: String,
    pub account_number: String,
    #[serde(default)]
    pub account_name: String,
}

/// Which operations Bread runs automatically on incoming deposits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutomationSettings {
    #[serde(default)]
    pub transfer: bool,
    #[serde(default)]
    pub swap: bool,
    #[serde(default)]
    pub offramp: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beneficiary_id: Option<String>,
}
