use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MultisigError;

/// A compound asset tag of the form `<chain>:<token>`, e.g. `base:usdc`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChainCurrency {
    chain: String,
    token: String,
}

impl ChainCurrency {
    pub fn new(chain: &str, token: &str) -> Result<Self, MultisigError> {
        let chain = chain.trim().to_lowercase();
        let token = token.trim().to_lowercase();
        if chain.is_empty() || token.is_empty() {
            return Err(MultisigError::validation(format!(
                "invalid chain currency '{}:{}'",
                chain, token
            )));
        }
        Ok(Self { chain, token })
    }

    /// The chain family, used to pick an executor.
    pub fn chain(&self) -> &str {
        &self.chain
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl FromStr for ChainCurrency {
    type Err = MultisigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((chain, token)) if !token.contains(':') => ChainCurrency::new(chain, token),
            _ => Err(MultisigError::validation(format!(
                "invalid chain currency '{}', expected <chain>:<token>",
                s
            ))),
        }
    }
}

impl TryFrom<String> for ChainCurrency {
    type Error = MultisigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ChainCurrency> for String {
    fn from(value: ChainCurrency) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ChainCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chain, self.token)
    }
}

/// Transfer amount. The transfer API reads `-1` as "entire balance".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(f64);

impl Amount {
    pub const ENTIRE_BALANCE: Amount = Amount(-1.0);

    pub fn new(value: f64) -> Result<Self, MultisigError> {
        if value == Self::ENTIRE_BALANCE.0 || (value.is_finite() && value > 0.0) {
            Ok(Amount(value))
        } else {
            Err(MultisigError::validation(format!("invalid amount {}", value)))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_entire_balance(&self) -> bool {
        *self == Self::ENTIRE_BALANCE
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_entire_balance() {
            write!(f, "entire balance")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
