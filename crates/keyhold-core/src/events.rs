//! Outward event notifications.
//!
//! Events are observable side effects, emitted exactly once per successful
//! mutating operation, after the state change has committed. A failed
//! operation emits nothing.

use crate::types::{Claim, ClaimId, ExecutionId, PermissionTag, Principal};
use keyhold_crypto::current_timestamp;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// Notification payloads carried by [`EventRecord`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdentityEvent {
    /// A key was added to the store
    KeyAdded {
        /// Principal of the new key
        principal: Principal,
    },
    /// A key was hard-deleted from the store
    KeyRemoved {
        /// Principal of the deleted key
        principal: Principal,
    },
    /// A permission tag was assigned to a key
    PermissionAssigned {
        /// Principal of the key
        principal: Principal,
        /// Tag assigned
        tag: PermissionTag,
    },
    /// A permission tag was revoked from a key
    PermissionRevoked {
        /// Principal of the key
        principal: Principal,
        /// Tag revoked
        tag: PermissionTag,
    },
    /// A claim was inserted at a previously empty id
    ClaimAdded {
        /// Derived claim identifier
        claim_id: ClaimId,
        /// Full claim record (topic, scheme, issuer, signature, data, uri)
        claim: Claim,
    },
    /// A claim was overwritten in place at an occupied id
    ClaimChanged {
        /// Derived claim identifier
        claim_id: ClaimId,
        /// The replacing claim record
        claim: Claim,
    },
    /// A claim was deleted
    ClaimRemoved {
        /// Derived claim identifier
        claim_id: ClaimId,
        /// The claim as it was at deletion
        claim: Claim,
    },
    /// An execution was requested and is awaiting approval
    ExecutionRequested {
        /// Execution identifier
        execution_id: ExecutionId,
        /// Target principal
        target: Principal,
        /// Amount carried
        value: u128,
        /// Opaque call payload
        payload: Vec<u8>,
    },
    /// An approved execution was dispatched to the action sink
    Executed {
        /// Execution identifier
        execution_id: ExecutionId,
        /// Target principal
        target: Principal,
        /// Amount carried
        value: u128,
        /// Opaque call payload
        payload: Vec<u8>,
    },
    /// An approver voted on an execution
    Approved {
        /// Execution identifier
        execution_id: ExecutionId,
        /// The approver's vote
        decision: bool,
    },
}

/// Envelope around an [`IdentityEvent`], stamped at emission time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Unique id of this emission
    pub event_id: Uuid,
    /// Unix timestamp of the emission
    pub timestamp: u64,
    /// The notification payload
    pub event: IdentityEvent,
}

impl EventRecord {
    /// Wrap an event in a freshly stamped envelope
    pub fn new(event: IdentityEvent) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            timestamp: current_timestamp(),
            event,
        }
    }
}

/// Outward observer interface the core calls after a successful commit
///
/// Emission is fire-and-forget: sinks cannot veto or undo the operation that
/// produced the event.
pub trait EventSink: Send + Sync {
    /// Deliver one event record
    fn emit(&self, record: EventRecord);
}

/// Event sink that logs every record through `tracing`
#[derive(Debug, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, record: EventRecord) {
        info!(event_id = %record.event_id, event = ?record.event, "identity event");
    }
}
