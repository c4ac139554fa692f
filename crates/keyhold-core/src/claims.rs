//! Claim registry.

use crate::{errors::*, keystore::PermissionedKeyStore, tags, traits::ClaimVerifier, types::*};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

/// Outcome of `add_claim`, selected by pre-existence of the claim id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// No claim existed at the id; it was inserted
    Added,
    /// A claim existed at the id; it was overwritten in place
    Replaced,
}

/// Registry of claims about the identity, keyed by (issuer, topic)
///
/// At most one live claim exists per (issuer, topic) pair: inserting a
/// second claim for the same pair replaces the first. The topic index maps
/// topic to the set of claim ids and stays consistent with the primary
/// store on every insert and remove.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClaimRegistry {
    claims: BTreeMap<ClaimId, Claim>,
    by_topic: BTreeMap<u32, BTreeSet<ClaimId>>,
}

impl ClaimRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the claim at `blake3(issuer, topic)`
    ///
    /// Requires ADD_CLAIM. Returns the derived id and whether the call was
    /// an insert or an in-place replace; the two outcomes are mutually
    /// exclusive and selected by pre-existence, not by caller intent. On a
    /// replace the id is unchanged, so the topic index needs no update.
    pub fn add_claim(
        &mut self,
        keys: &PermissionedKeyStore,
        caller: Principal,
        claim: Claim,
    ) -> Result<(ClaimId, ClaimOutcome)> {
        keys.guard(caller, tags::add_claim())?;

        let claim_id = claim.id();
        let outcome = if self.claims.contains_key(&claim_id) {
            ClaimOutcome::Replaced
        } else {
            self.by_topic
                .entry(claim.topic)
                .or_default()
                .insert(claim_id);
            ClaimOutcome::Added
        };

        info!(
            "Claim {:?}: {} (issuer {}, topic {})",
            outcome, claim_id, claim.issuer, claim.topic
        );
        self.claims.insert(claim_id, claim);
        Ok((claim_id, outcome))
    }

    /// Delete the claim at `claim_id`
    ///
    /// Requires REMOVE_CLAIM. Fails with `ClaimNotFound` if absent. Returns
    /// the removed claim so callers can report its fields.
    pub fn remove_claim(
        &mut self,
        keys: &PermissionedKeyStore,
        caller: Principal,
        claim_id: ClaimId,
    ) -> Result<Claim> {
        keys.guard(caller, tags::remove_claim())?;

        let claim = self
            .claims
            .remove(&claim_id)
            .ok_or(IdentityError::ClaimNotFound(claim_id))?;

        if let Some(ids) = self.by_topic.get_mut(&claim.topic) {
            ids.remove(&claim_id);
            if ids.is_empty() {
                self.by_topic.remove(&claim.topic);
            }
        }

        info!("Claim removed: {}", claim_id);
        Ok(claim)
    }

    /// Look up a claim by id; no authorization required
    pub fn get_claim(&self, claim_id: ClaimId) -> Result<&Claim> {
        self.claims
            .get(&claim_id)
            .ok_or(IdentityError::ClaimNotFound(claim_id))
    }

    /// Ids of all live claims under a topic; empty for unknown topics
    pub fn claim_ids_by_topic(&self, topic: u32) -> BTreeSet<ClaimId> {
        self.by_topic.get(&topic).cloned().unwrap_or_default()
    }

    /// Number of live claims
    pub fn claim_count(&self) -> usize {
        self.claims.len()
    }

    /// Whether the signature attests `data` about `subject` under `topic`
    ///
    /// Delegates to the external verifier; never errors, only returns false.
    pub fn is_claim_valid(
        &self,
        verifier: &dyn ClaimVerifier,
        subject: Principal,
        topic: u32,
        signature: &[u8],
        data: &[u8],
    ) -> bool {
        verifier.is_claim_valid(subject, topic, signature, data)
    }
}
