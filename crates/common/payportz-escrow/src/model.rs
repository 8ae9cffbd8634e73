use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EscrowError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EscrowStatus {
    Created,
    Funded,
    Released,
}

impl fmt::Display for EscrowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Created => "created",
            Self::Funded => "funded",
            Self::Released => "released",
        };
        f.write_str(s)
    }
}

/// Client-driven escrow transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EscrowAction {
    Fund,
    Release,
}

impl EscrowAction {
    /// Status an escrow ends up in after this action.
    pub fn target(&self) -> EscrowStatus {
        match self {
            Self::Fund => EscrowStatus::Funded,
            Self::Release => EscrowStatus::Released,
        }
    }

    /// The status this action is expected to start from.
    pub fn expected_source(&self) -> EscrowStatus {
        match self {
            Self::Fund => EscrowStatus::Created,
            Self::Release => EscrowStatus::Funded,
        }
    }
}

impl fmt::Display for EscrowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fund => f.write_str("fund"),
            Self::Release => f.write_str("release"),
        }
    }
}

impl FromStr for EscrowAction {
    type Err = EscrowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fund" => Ok(Self::Fund),
            "release" => Ok(Self::Release),
            other => Err(EscrowError::Validation(format!(
                "unknown action '{}', expected fund or release",
                other
            ))),
        }
    }
}

/// A demo escrow record, stored in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Escrow {
    pub id: String,
    pub amount: f64,
    pub recipient: String,
    pub currency: String,
    pub creator: String,
    pub status: EscrowStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of an escrow creation request. Every field is optional on the wire;
/// the store reports what is missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EscrowRequest {
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: Option<f64>,
    #[serde(default)]
    pub recipient: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub creator: Option<String>,
}

/// Body of an escrow transition request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransitionRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
}

// Amounts arrive as numbers or numeric strings; anything else counts as absent.
fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok().filter(|a| a.is_finite()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_action() {
        assert_eq!("fund".parse::<EscrowAction>().unwrap(), EscrowAction::Fund);
        assert_eq!(" Release ".parse::<EscrowAction>().unwrap(), EscrowAction::Release);
        assert!(matches!("refund".parse::<EscrowAction>(), Err(EscrowError::Validation(_))));
    }

    #[test]
    fn test_request_accepts_string_amount() {
        let req: EscrowRequest =
            serde_json::from_str(r#"{"amount":"42.5","recipient":"0xabc"}"#).unwrap();
        assert_eq!(req.amount, Some(42.5));

        let req: EscrowRequest = serde_json::from_str(r#"{"amount":true}"#).unwrap();
        assert_eq!(req.amount, None);
        assert_eq!(req.recipient, None);
    }

    #[test]
    fn test_escrow_shape() {
        let escrow = Escrow {
            id: "esc_1_abcdef".to_string(),
            amount: 100.0,
            recipient: "0xabc".to_string(),
            currency: "starknet:usdc".to_string(),
            creator: "guest".to_string(),
            status: EscrowStatus::Created,
            created_at: Utc::now(),
            updated_at: None,
        };
        let json = serde_json::to_value(&escrow).unwrap();
        assert_eq!(json["status"], "created");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_none());
    }
}
