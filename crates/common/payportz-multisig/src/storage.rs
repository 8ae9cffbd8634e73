use async_trait::async_trait;
use payportz_storage::{read_json, write_json, BlobStore};
use std::sync::Arc;

use crate::error::MultisigError;
use crate::proposal::Proposal;

/// Blob key under which the proposal list is kept.
pub const PROPOSALS_KEY: &str = "payportz_multisigs";

/// Trait defining the interface for proposal storage backends.
///
/// The list is read and written wholesale. Implementations do not guard
/// against concurrent read-modify-write cycles; `MultisigEngine` serialises
/// its own callers.
#[async_trait]
pub trait ProposalRepository: Send + Sync {
    /// Load every proposal, most recent first
    async fn load(&self) -> Result<Vec<Proposal>, MultisigError>;

    /// Replace the stored list
    async fn save(&self, proposals: &[Proposal]) -> Result<(), MultisigError>;

    /// Replace a single proposal in the stored list, matched by id
    async fn update(&self, proposal: &Proposal) -> Result<(), MultisigError> {
        let mut proposals = self.load().await?;
        let slot = proposals
            .iter_mut()
            .find(|p| p.id == proposal.id)
            .ok_or_else(|| MultisigError::NotFound(proposal.id.clone()))?;
        *slot = proposal.clone();
        self.save(&proposals).await
    }
}

/// `ProposalRepository` backed by a `BlobStore` key.
#[derive(Clone)]
pub struct BlobProposalRepository {
    store: Arc<dyn BlobStore>,
    key: String,
}

impl BlobProposalRepository {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self::with_key(store, PROPOSALS_KEY)
    }

    pub fn with_key(store: Arc<dyn BlobStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }
}

#[async_trait]
impl ProposalRepository for BlobProposalRepository {
    async fn load(&self) -> Result<Vec<Proposal>, MultisigError> {
        Ok(read_json(self.store.as_ref(), &self.key).await?)
    }

    async fn save(&self, proposals: &[Proposal]) -> Result<(), MultisigError> {
        write_json(self.store.as_ref(), &self.key, proposals).await?;
        log::debug!("Persisted {} proposals under '{}'", proposals.len(), self.key);
        Ok(())
    }
}

/// Create a repository over a fresh in-memory blob store
pub fn create_memory_repository() -> Arc<dyn ProposalRepository> {
    Arc::new(BlobProposalRepository::new(Arc::new(
        payportz_storage::MemoryBlobStore::new(),
    )))
}
