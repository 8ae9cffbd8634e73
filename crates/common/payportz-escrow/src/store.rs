use chrono::Utc;
use payportz_storage::{generate_record_id, read_json, write_json, BlobStore};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::EscrowError;
use crate::model::{Escrow, EscrowAction, EscrowRequest, EscrowStatus, TransitionRequest};

/// Blob key holding the escrow array.
pub const ESCROWS_KEY: &str = "mock_escrows";

/// Currency recorded when a request names none.
pub const DEFAULT_CURRENCY: &str = "starknet:usdc";

const ESCROW_ID_PREFIX: &str = "esc";
const DEFAULT_CREATOR: &str = "guest";

/// How strictly transitions follow `created -> funded -> released`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscrowPolicy {
    /// Any action is accepted from any status.
    #[default]
    Permissive,
    /// Only `created -> funded` and `funded -> released` are accepted.
    Strict,
}

impl FromStr for EscrowPolicy {
    type Err = EscrowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "permissive" => Ok(Self::Permissive),
            "strict" => Ok(Self::Strict),
            other => Err(EscrowError::Validation(format!("unknown escrow policy '{}'", other))),
        }
    }
}

impl fmt::Display for EscrowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Permissive => f.write_str("permissive"),
            Self::Strict => f.write_str("strict"),
        }
    }
}

/// Escrow records over a `BlobStore`, rewritten wholesale on every change.
pub struct EscrowStore {
    blobs: Arc<dyn BlobStore>,
    policy: EscrowPolicy,
    write_lock: Mutex<()>,
}

impl EscrowStore {
    pub fn new(blobs: Arc<dyn BlobStore>, policy: EscrowPolicy) -> Self {
        Self {
            blobs,
            policy,
            write_lock: Mutex::new(()),
        }
    }

    pub fn policy(&self) -> EscrowPolicy {
        self.policy
    }

    async fn load(&self) -> Result<Vec<Escrow>, EscrowError> {
        Ok(read_json(self.blobs.as_ref(), ESCROWS_KEY).await?)
    }

    async fn save(&self, escrows: &[Escrow]) -> Result<(), EscrowError> {
        Ok(write_json(self.blobs.as_ref(), ESCROWS_KEY, escrows).await?)
    }

    /// Validate `request` and append a new `created` escrow.
    pub async fn create(&self, request: &EscrowRequest) -> Result<Escrow, EscrowError> {
        let amount = request.amount.filter(|a| a.is_finite() && *a != 0.0);
        let recipient = request
            .recipient
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty());
        let (amount, recipient) = match (amount, recipient) {
            (Some(a), Some(r)) => (a, r.to_string()),
            _ => {
                return Err(EscrowError::Validation(
                    "amount and recipient required".to_string(),
                ))
            }
        };

        let _guard = self.write_lock.lock().await;
        let mut escrows = self.load().await?;

        let mut id = generate_record_id(ESCROW_ID_PREFIX);
        while escrows.iter().any(|e| e.id == id) {
            id = generate_record_id(ESCROW_ID_PREFIX);
        }

        let escrow = Escrow {
            id,
            amount,
            recipient,
            currency: non_blank(&request.currency).unwrap_or(DEFAULT_CURRENCY).to_string(),
            creator: non_blank(&request.creator).unwrap_or(DEFAULT_CREATOR).to_string(),
            status: EscrowStatus::Created,
            created_at: Utc::now(),
            updated_at: None,
        };
        escrows.push(escrow.clone());
        self.save(&escrows).await?;

        log::info!(
            "Created escrow {} ({} {} to {})",
            escrow.id,
            escrow.amount,
            escrow.currency,
            escrow.recipient
        );
        Ok(escrow)
    }

    pub async fn get(&self, id: &str) -> Result<Escrow, EscrowError> {
        self.load()
            .await?
            .into_iter()
            .find(|e| e.id == id)
            .ok_or_else(|| EscrowError::NotFound(id.to_string()))
    }

    /// All escrows in insertion order.
    pub async fn list(&self) -> Result<Vec<Escrow>, EscrowError> {
        self.load().await
    }

    /// Validate a raw transition request and apply it.
    pub async fn apply(&self, request: &TransitionRequest) -> Result<Escrow, EscrowError> {
        match (non_blank(&request.id), non_blank(&request.action)) {
            (Some(id), Some(action)) => self.transition(id, action.parse()?).await,
            _ => Err(EscrowError::Validation("id and action required".to_string())),
        }
    }

    /// Move escrow `id` to the status `action` leads to.
    pub async fn transition(&self, id: &str, action: EscrowAction) -> Result<Escrow, EscrowError> {
        let _guard = self.write_lock.lock().await;
        let mut escrows = self.load().await?;
        let escrow = escrows
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| EscrowError::NotFound(id.to_string()))?;

        if self.policy == EscrowPolicy::Strict && escrow.status != action.expected_source() {
            return Err(EscrowError::InvalidTransition {
                from: escrow.status,
                action,
            });
        }

        let from = escrow.status;
        escrow.status = action.target();
        escrow.updated_at = Some(Utc::now());
        let escrow = escrow.clone();
        self.save(&escrows).await?;

        log::info!("Escrow {} moved {} -> {}", escrow.id, from, escrow.status);
        Ok(escrow)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use payportz_storage::MemoryBlobStore;

    fn store(policy: EscrowPolicy) -> EscrowStore {
        EscrowStore::new(Arc::new(MemoryBlobStore::new()), policy)
    }

    fn request(amount: Option<f64>, recipient: Option<&str>) -> EscrowRequest {
        EscrowRequest {
            amount,
            recipient: recipient.map(str::to_string),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let store = store(EscrowPolicy::Permissive);
        let escrow = store.create(&request(Some(100.0), Some("0xabc"))).await.unwrap();
        assert!(escrow.id.starts_with("esc_"));
        assert_eq!(escrow.status, EscrowStatus::Created);
        assert_eq!(escrow.currency, DEFAULT_CURRENCY);
        assert_eq!(escrow.creator, "guest");
        assert_eq!(escrow.updated_at, None);
    }

    #[tokio::test]
    async fn test_create_requires_amount_and_recipient() {
        let store = store(EscrowPolicy::Permissive);
        for req in [
            request(None, Some("0xabc")),
            request(Some(0.0), Some("0xabc")),
            request(Some(5.0), None),
            request(Some(5.0), Some("  ")),
        ] {
            let err = store.create(&req).await.unwrap_err();
            assert_eq!(err.to_string(), "amount and recipient required");
        }
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_finite_amount_is_rejected() {
        let store = store(EscrowPolicy::Permissive);
        store.create(&request(Some(1.0), Some("0xabc"))).await.unwrap();

        for body in [
            r#"{"amount":"inf","recipient":"0xabc"}"#,
            r#"{"amount":"-Infinity","recipient":"0xabc"}"#,
            r#"{"amount":"NaN","recipient":"0xabc"}"#,
        ] {
            let req: EscrowRequest = serde_json::from_str(body).unwrap();
            let err = store.create(&req).await.unwrap_err();
            assert_eq!(err.to_string(), "amount and recipient required");
        }
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let store = store(EscrowPolicy::Permissive);
        let a = store.create(&request(Some(1.0), Some("a"))).await.unwrap();
        let b = store.create(&request(Some(2.0), Some("b"))).await.unwrap();
        let ids: Vec<String> = store.list().await.unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }

    #[tokio::test]
    async fn test_permissive_release_skips_funding() {
        let store = store(EscrowPolicy::Permissive);
        let escrow = store.create(&request(Some(100.0), Some("0xabc"))).await.unwrap();
        let released = store.transition(&escrow.id, EscrowAction::Release).await.unwrap();
        assert_eq!(released.status, EscrowStatus::Released);
        assert!(released.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_strict_policy_enforces_order() {
        let store = store(EscrowPolicy::Strict);
        let escrow = store.create(&request(Some(100.0), Some("0xabc"))).await.unwrap();

        let err = store.transition(&escrow.id, EscrowAction::Release).await.unwrap_err();
        assert!(matches!(
            err,
            EscrowError::InvalidTransition { from: EscrowStatus::Created, action: EscrowAction::Release }
        ));
        assert_eq!(store.get(&escrow.id).await.unwrap().status, EscrowStatus::Created);

        store.transition(&escrow.id, EscrowAction::Fund).await.unwrap();
        let released = store.transition(&escrow.id, EscrowAction::Release).await.unwrap();
        assert_eq!(released.status, EscrowStatus::Released);
    }

    #[tokio::test]
    async fn test_apply_validates_request() {
        let store = store(EscrowPolicy::Permissive);
        let err = store.apply(&TransitionRequest::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "id and action required");

        let err = store
            .apply(&TransitionRequest { id: Some("esc_x".into()), action: Some("refund".into()) })
            .await
            .unwrap_err();
        assert!(matches!(err, EscrowError::Validation(_)));

        let err = store
            .apply(&TransitionRequest { id: Some("esc_x".into()), action: Some("fund".into()) })
            .await
            .unwrap_err();
        assert!(matches!(err, EscrowError::NotFound(_)));
    }
}
