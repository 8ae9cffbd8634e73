use chrono::Utc;
use payportz_storage::generate_record_id;
use serde::{Deserialize, Serialize};

use crate::asset::{Amount, ChainCurrency};
use crate::error::MultisigError;
use crate::proposal::{Proposal, ProposalState};

/// Id prefix for multisig proposals.
pub const PROPOSAL_ID_PREFIX: &str = "ms";

/// Creator recorded when none is supplied.
pub const DEFAULT_CREATOR: &str = "guest";

/// Raw input for a new proposal, as entered by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalRequest {
    /// Comma-separated signer addresses or usernames
    pub signers: String,
    pub threshold: usize,
    pub chain_currency: String,
    pub amount: f64,
    pub recipient: String,
    #[serde(default)]
    pub creator: Option<String>,
}

/// Split a comma-separated signer list, trimming entries and dropping empties
/// and case-insensitive duplicates.
pub fn parse_signers(input: &str) -> Vec<String> {
    let mut signers: Vec<String> = Vec::new();
    for entry in input.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let lowered = entry.to_lowercase();
        if !signers.iter().any(|s| s.to_lowercase() == lowered) {
            signers.push(entry.to_string());
        }
    }
    signers
}

/// Validate `request` and construct a pending proposal whose id does not
/// collide with any of `existing`.
pub fn build_proposal(
    request: &ProposalRequest,
    existing: &[Proposal],
) -> Result<Proposal, MultisigError> {
    let signers = parse_signers(&request.signers);
    if signers.len() < 2 {
        return Err(MultisigError::validation("at least two signers required"));
    }
    if request.threshold == 0 || request.threshold > signers.len() {
        return Err(MultisigError::validation("invalid threshold"));
    }

    let chain_currency: ChainCurrency = request.chain_currency.parse()?;
    let amount = Amount::new(request.amount)?;

    let recipient = request.recipient.trim();
    if recipient.is_empty() {
        return Err(MultisigError::validation("recipient required"));
    }

    let creator = request
        .creator
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CREATOR)
        .to_string();

    let mut id = generate_record_id(PROPOSAL_ID_PREFIX);
    while existing.iter().any(|p| p.id == id) {
        id = generate_record_id(PROPOSAL_ID_PREFIX);
    }

    Ok(Proposal {
        id,
        creator,
        chain_currency,
        amount,
        recipient: recipient.to_string(),
        signers,
        threshold: request.threshold,
        approvals: Vec::new(),
        state: ProposalState::Pending,
        created_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proposal::ProposalStatus;

    fn request(signers: &str, threshold: usize) -> ProposalRequest {
        ProposalRequest {
            signers: signers.to_string(),
            threshold,
            chain_currency: "base:usdc".to_string(),
            amount: 100.0,
            recipient: "0xabc".to_string(),
            creator: None,
        }
    }

    fn message(err: MultisigError) -> String {
        match err {
            MultisigError::Validation(msg) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_signers_trims_and_dedupes() {
        assert_eq!(
            parse_signers(" alice, bob ,,Carol, ALICE ,"),
            vec!["alice", "bob", "Carol"]
        );
        assert!(parse_signers(" , ,").is_empty());
    }

    #[test]
    fn test_build_pending_proposal() {
        let p = build_proposal(&request("alice,bob,carol", 2), &[]).unwrap();
        assert!(p.id.starts_with("ms_"));
        assert_eq!(p.signers, vec!["alice", "bob", "carol"]);
        assert_eq!(p.threshold, 2);
        assert!(p.approvals.is_empty());
        assert_eq!(p.status(), ProposalStatus::Pending);
        assert_eq!(p.creator, DEFAULT_CREATOR);
    }

    #[test]
    fn test_requires_two_signers() {
        let err = build_proposal(&request("alice", 1), &[]).unwrap_err();
        assert_eq!(message(err), "at least two signers required");

        let err = build_proposal(&request("alice, ALICE", 1), &[]).unwrap_err();
        assert_eq!(message(err), "at least two signers required");
    }

    #[test]
    fn test_threshold_bounds() {
        assert_eq!(message(build_proposal(&request("a,b", 0), &[]).unwrap_err()), "invalid threshold");
        assert_eq!(message(build_proposal(&request("a,b", 3), &[]).unwrap_err()), "invalid threshold");
        assert!(build_proposal(&request("a,b", 2), &[]).is_ok());
        assert!(build_proposal(&request("a,b", 1), &[]).is_ok());
    }

    #[test]
    fn test_rejects_bad_fields() {
        let mut req = request("a,b", 1);
        req.chain_currency = "usdc".to_string();
        assert!(build_proposal(&req, &[]).is_err());

        let mut req = request("a,b", 1);
        req.amount = 0.0;
        assert!(build_proposal(&req, &[]).is_err());

        let mut req = request("a,b", 1);
        req.recipient = "  ".to_string();
        assert_eq!(message(build_proposal(&req, &[]).unwrap_err()), "recipient required");
    }

    #[test]
    fn test_creator_is_kept() {
        let mut req = request("a,b", 1);
        req.creator = Some(" Acme Ltd ".to_string());
        assert_eq!(build_proposal(&req, &[]).unwrap().creator, "Acme Ltd");
    }
}
