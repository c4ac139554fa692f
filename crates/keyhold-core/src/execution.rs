//! Execution request/approval workflow.

use crate::{errors::*, keystore::PermissionedKeyStore, tags, traits::ActionSink, types::*};
use keyhold_crypto::current_timestamp;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Rule deciding when the recorded approvals are sufficient to run an
/// execution
pub trait QuorumPolicy: Send + Sync {
    /// True once `votes` satisfies the policy
    fn is_satisfied(&self, votes: &BTreeMap<Principal, bool>) -> bool;
}

/// One approving key suffices (default policy)
#[derive(Debug, Default, Clone, Copy)]
pub struct SingleApproval;

impl QuorumPolicy for SingleApproval {
    fn is_satisfied(&self, votes: &BTreeMap<Principal, bool>) -> bool {
        votes.values().any(|&approved| approved)
    }
}

/// A fixed number of distinct approving keys is required
#[derive(Debug, Clone, Copy)]
pub struct Threshold(pub usize);

impl QuorumPolicy for Threshold {
    fn is_satisfied(&self, votes: &BTreeMap<Principal, bool>) -> bool {
        votes.values().filter(|&&approved| approved).count() >= self.0
    }
}

/// Outcome of a successful `approve` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalResult {
    /// Vote recorded; quorum not yet met, record stays Requested
    Pending,
    /// Record moved to Rejected; the action sink was not invoked
    Rejected,
    /// Record moved to Executed and dispatched; bool is the sink result
    Dispatched(bool),
}

/// Owns pending action requests and their approval state
///
/// State machine per execution: Requested -> Executed or
/// Requested -> Rejected; both terminal states are final.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionCoordinator {
    executions: BTreeMap<ExecutionId, Execution>,
    next_id: ExecutionId,
}

impl Default for ExecutionCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionCoordinator {
    /// Empty coordinator; ids start at 1
    pub fn new() -> Self {
        Self {
            executions: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Request an action on the identity's behalf
    ///
    /// Requires EXECUTE. Allocates a fresh id strictly greater than all
    /// previously issued ids and stores the record in Requested state. This
    /// call never invokes the action sink.
    pub fn request(
        &mut self,
        keys: &PermissionedKeyStore,
        caller: Principal,
        target: Principal,
        value: u128,
        payload: Vec<u8>,
    ) -> Result<ExecutionId> {
        keys.guard(caller, tags::execute())?;

        let id = self.next_id;
        self.next_id += 1;

        self.executions.insert(
            id,
            Execution {
                id,
                target,
                value,
                payload,
                status: ExecutionStatus::Requested,
                requested_by: caller,
                requested_at: current_timestamp(),
                votes: BTreeMap::new(),
            },
        );

        info!("Execution {} requested by {} (target {})", id, caller, target);
        Ok(id)
    }

    /// Vote on a pending execution
    ///
    /// Requires APPROVE. Fails with `ExecutionNotFound` for unknown ids and
    /// `InvalidState` unless the record is in Requested state; there is no
    /// re-approval and no un-approval.
    ///
    /// A false decision moves the record to Rejected without touching the
    /// sink. A true decision records the vote; once the quorum policy is
    /// satisfied the Executed transition is committed and the sink invoked.
    pub fn approve(
        &mut self,
        keys: &PermissionedKeyStore,
        sink: &dyn ActionSink,
        quorum: &dyn QuorumPolicy,
        caller: Principal,
        id: ExecutionId,
        decision: bool,
    ) -> Result<ApprovalResult> {
        keys.guard(caller, tags::approve())?;

        let execution = self
            .executions
            .get_mut(&id)
            .ok_or(IdentityError::ExecutionNotFound(id))?;

        if execution.status != ExecutionStatus::Requested {
            return Err(IdentityError::InvalidState {
                id,
                status: execution.status,
            });
        }

        execution.votes.insert(caller, decision);

        if !decision {
            execution.status = ExecutionStatus::Rejected;
            info!("Execution {} rejected by {}", id, caller);
            return Ok(ApprovalResult::Rejected);
        }

        if !quorum.is_satisfied(&execution.votes) {
            debug!("Execution {} approval by {} recorded, quorum pending", id, caller);
            return Ok(ApprovalResult::Pending);
        }

        // Commit the terminal transition before invoking the sink: a sink
        // that reenters the coordinator must observe InvalidState rather
        // than dispatch the same execution twice.
        execution.status = ExecutionStatus::Executed;
        let (target, value, payload) = (execution.target, execution.value, execution.payload.clone());

        let dispatched = sink.dispatch(target, value, &payload);
        info!(
            "Execution {} dispatched to {} (value {}, success {})",
            id, target, value, dispatched
        );
        Ok(ApprovalResult::Dispatched(dispatched))
    }

    /// Look up an execution record
    pub fn get_execution(&self, id: ExecutionId) -> Result<&Execution> {
        self.executions
            .get(&id)
            .ok_or(IdentityError::ExecutionNotFound(id))
    }

    /// Number of execution records, in any state
    pub fn execution_count(&self) -> usize {
        self.executions.len()
    }
}
