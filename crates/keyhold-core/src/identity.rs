//! Identity facade.
//!
//! Wires the three components together with the external collaborators and
//! emits notifications after each successful commit. This is the call
//! surface a host environment drives; the host is responsible for
//! serializing calls, the facade for keeping each call atomic.

use crate::{
    claims::{ClaimOutcome, ClaimRegistry},
    errors::*,
    events::{EventRecord, EventSink, IdentityEvent},
    execution::{ApprovalResult, ExecutionCoordinator, QuorumPolicy},
    keystore::PermissionedKeyStore,
    traits::{ActionSink, ClaimVerifier},
    types::*,
};
use std::collections::BTreeSet;
use std::sync::Arc;

/// The identity record: keys, claims, and pending executions behind one
/// permission-checked surface
///
/// Every mutating operation is all-or-nothing: a failed guard or lookup
/// leaves no observable state change and emits no notification.
pub struct Identity<E, A, V, Q>
where
    E: EventSink,
    A: ActionSink,
    V: ClaimVerifier,
    Q: QuorumPolicy,
{
    keys: PermissionedKeyStore,
    claims: ClaimRegistry,
    executions: ExecutionCoordinator,
    events: Arc<E>,
    action_sink: Arc<A>,
    verifier: Arc<V>,
    quorum: Arc<Q>,
}

impl<E, A, V, Q> Identity<E, A, V, Q>
where
    E: EventSink,
    A: ActionSink,
    V: ClaimVerifier,
    Q: QuorumPolicy,
{
    /// Create an identity whose key store is bootstrapped with `owner`
    ///
    /// The owner is simply the first key, added with an empty permission set
    /// (full control); no special-cased identity exists afterwards.
    pub fn new(
        owner: Principal,
        events: Arc<E>,
        action_sink: Arc<A>,
        verifier: Arc<V>,
        quorum: Arc<Q>,
    ) -> Self {
        Self::with_collision_policy(
            owner,
            KeyCollisionPolicy::Reject,
            events,
            action_sink,
            verifier,
            quorum,
        )
    }

    /// Create an identity with an explicit key-collision policy
    pub fn with_collision_policy(
        owner: Principal,
        collision_policy: KeyCollisionPolicy,
        events: Arc<E>,
        action_sink: Arc<A>,
        verifier: Arc<V>,
        quorum: Arc<Q>,
    ) -> Self {
        Self {
            keys: PermissionedKeyStore::with_policy(owner, collision_policy),
            claims: ClaimRegistry::new(),
            executions: ExecutionCoordinator::new(),
            events,
            action_sink,
            verifier,
            quorum,
        }
    }

    fn emit(&self, event: IdentityEvent) {
        self.events.emit(EventRecord::new(event));
    }

    // ========================================================================
    // Key registry
    // ========================================================================

    /// Add a key with full control; requires ADD_KEY
    pub fn add_key(&mut self, caller: Principal, principal: Principal) -> Result<()> {
        self.keys.add_key(caller, principal)?;
        self.emit(IdentityEvent::KeyAdded { principal });
        Ok(())
    }

    /// Hard-delete a key; requires REMOVE_KEY
    pub fn remove_key(&mut self, caller: Principal, principal: Principal) -> Result<()> {
        self.keys.remove_key(caller, principal)?;
        self.emit(IdentityEvent::KeyRemoved { principal });
        Ok(())
    }

    /// Add a tag to a key's permission set; requires ASSIGN_PERMISSION
    pub fn assign_permission(
        &mut self,
        caller: Principal,
        principal: Principal,
        tag: PermissionTag,
    ) -> Result<()> {
        self.keys.assign_permission(caller, principal, tag)?;
        self.emit(IdentityEvent::PermissionAssigned { principal, tag });
        Ok(())
    }

    /// Remove a tag from a key's permission set; requires REVOKE_PERMISSION
    pub fn revoke_permission(
        &mut self,
        caller: Principal,
        principal: Principal,
        tag: PermissionTag,
    ) -> Result<()> {
        self.keys.revoke_permission(caller, principal, tag)?;
        self.emit(IdentityEvent::PermissionRevoked { principal, tag });
        Ok(())
    }

    /// The authorization predicate; see
    /// [`PermissionedKeyStore::authorize`]
    pub fn authorize(&self, caller: Principal, tag: PermissionTag) -> bool {
        self.keys.authorize(caller, tag)
    }

    /// Look up a key record
    pub fn get_key(&self, principal: Principal) -> Result<&Key> {
        self.keys.get_key(principal)
    }

    // ========================================================================
    // Claim registry
    // ========================================================================

    /// Insert or replace a claim; requires ADD_CLAIM
    ///
    /// Signals `ClaimAdded` on insert and `ClaimChanged` on replace; the two
    /// are mutually exclusive outcomes selected by pre-existence.
    pub fn add_claim(&mut self, caller: Principal, claim: Claim) -> Result<ClaimId> {
        let stored = claim.clone();
        let (claim_id, outcome) = self.claims.add_claim(&self.keys, caller, claim)?;

        let event = match outcome {
            ClaimOutcome::Added => IdentityEvent::ClaimAdded {
                claim_id,
                claim: stored,
            },
            ClaimOutcome::Replaced => IdentityEvent::ClaimChanged {
                claim_id,
                claim: stored,
            },
        };
        self.emit(event);
        Ok(claim_id)
    }

    /// Delete a claim; requires REMOVE_CLAIM
    pub fn remove_claim(&mut self, caller: Principal, claim_id: ClaimId) -> Result<()> {
        let claim = self.claims.remove_claim(&self.keys, caller, claim_id)?;
        self.emit(IdentityEvent::ClaimRemoved { claim_id, claim });
        Ok(())
    }

    /// Look up a claim; read-only, no authorization required
    pub fn get_claim(&self, claim_id: ClaimId) -> Result<&Claim> {
        self.claims.get_claim(claim_id)
    }

    /// Ids of live claims under a topic; empty set for unknown topics
    pub fn claim_ids_by_topic(&self, topic: u32) -> BTreeSet<ClaimId> {
        self.claims.claim_ids_by_topic(topic)
    }

    /// Whether a signature attests `data` about `subject` under `topic`
    ///
    /// Delegates to the injected verifier; never errors, only returns false.
    pub fn is_claim_valid(
        &self,
        subject: Principal,
        topic: u32,
        signature: &[u8],
        data: &[u8],
    ) -> bool {
        self.claims
            .is_claim_valid(self.verifier.as_ref(), subject, topic, signature, data)
    }

    // ========================================================================
    // Execution workflow
    // ========================================================================

    /// Request an action on the identity's behalf; requires EXECUTE
    pub fn request_execution(
        &mut self,
        caller: Principal,
        target: Principal,
        value: u128,
        payload: Vec<u8>,
    ) -> Result<ExecutionId> {
        let execution_id =
            self.executions
                .request(&self.keys, caller, target, value, payload.clone())?;
        self.emit(IdentityEvent::ExecutionRequested {
            execution_id,
            target,
            value,
            payload,
        });
        Ok(execution_id)
    }

    /// Vote on a pending execution; requires APPROVE
    ///
    /// Signals `Approved` with the decision; when the quorum policy is
    /// satisfied the record is committed Executed, the action sink invoked,
    /// and `Executed` signalled with the same fields as the request. The
    /// returned bool reports whether the underlying action succeeded, as
    /// distinct from the approval bookkeeping; it is false while the record
    /// awaits further quorum votes and after a rejection.
    pub fn approve(
        &mut self,
        caller: Principal,
        execution_id: ExecutionId,
        decision: bool,
    ) -> Result<bool> {
        let result = self.executions.approve(
            &self.keys,
            self.action_sink.as_ref(),
            self.quorum.as_ref(),
            caller,
            execution_id,
            decision,
        )?;

        self.emit(IdentityEvent::Approved {
            execution_id,
            decision,
        });

        if let ApprovalResult::Dispatched(dispatched) = result {
            let execution = self.executions.get_execution(execution_id)?;
            let (target, value, payload) =
                (execution.target, execution.value, execution.payload.clone());
            self.emit(IdentityEvent::Executed {
                execution_id,
                target,
                value,
                payload,
            });
            return Ok(dispatched);
        }
        Ok(false)
    }

    /// Look up an execution record
    pub fn get_execution(&self, execution_id: ExecutionId) -> Result<&Execution> {
        self.executions.get_execution(execution_id)
    }
}
