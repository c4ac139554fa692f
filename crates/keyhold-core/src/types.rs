//! Core type definitions.

use keyhold_crypto::{
    current_timestamp, derive_claim_id, derive_permission_tag, derive_principal, DIGEST_SIZE,
    PRINCIPAL_SIZE, PUBLIC_KEY_SIZE,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A principal: a 20-byte public-key-derived address granted some level of
/// control over the identity, or the target of an execution.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Principal(pub [u8; PRINCIPAL_SIZE]);

impl Principal {
    /// Derive a principal address from an Ed25519 public key
    pub fn from_public_key(public_key: &[u8; PUBLIC_KEY_SIZE]) -> Self {
        Self(derive_principal(public_key))
    }

    /// Raw address bytes
    pub fn as_bytes(&self) -> &[u8; PRINCIPAL_SIZE] {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Principal({})", self)
    }
}

/// An opaque fixed-width permission tag gating one category of mutating
/// operation. Canonically derived by hashing a human-readable name; the
/// registry never interprets tags beyond set membership.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PermissionTag(pub [u8; DIGEST_SIZE]);

impl PermissionTag {
    /// Derive a tag from its canonical name string
    pub fn from_name(name: &str) -> Self {
        Self(derive_permission_tag(name))
    }
}

impl fmt::Display for PermissionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for PermissionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PermissionTag({})", self)
    }
}

/// Derived claim identifier: `blake3(version || issuer || topic)`
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClaimId(pub [u8; DIGEST_SIZE]);

impl ClaimId {
    /// Compute the claim id for an (issuer, topic) pair
    pub fn derive(issuer: Principal, topic: u32) -> Self {
        Self(derive_claim_id(issuer.as_bytes(), topic))
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClaimId({})", self)
    }
}

/// Monotonically increasing execution request identifier
pub type ExecutionId = u64;

/// A key granted some level of control over the identity
///
/// An empty permission set means unrestricted (full) control; a non-empty
/// set restricts the key to exactly those tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key {
    /// Principal address of the key
    pub principal: Principal,
    /// Whether the key may currently act
    pub active: bool,
    /// Permission tags held by the key; empty means full control
    pub permissions: BTreeSet<PermissionTag>,
    /// Unix timestamp the key was added
    pub added_at: u64,
}

impl Key {
    /// Create an active key with full control (empty permission set)
    pub fn new(principal: Principal) -> Self {
        Self {
            principal,
            active: true,
            permissions: BTreeSet::new(),
            added_at: current_timestamp(),
        }
    }
}

/// A third-party or self-issued assertion about the identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// Integer code naming the subject matter of the claim
    pub topic: u32,
    /// Integer code naming the format of `data`
    pub scheme: u32,
    /// Issuing principal; equals the identity itself for self-attested claims
    pub issuer: Principal,
    /// Scheme-dependent signature bytes
    pub signature: Vec<u8>,
    /// Scheme-dependent payload bytes
    pub data: Vec<u8>,
    /// Optional external pointer
    pub uri: Option<String>,
}

impl Claim {
    /// The derived identifier for this claim, a pure function of
    /// (issuer, topic)
    pub fn id(&self) -> ClaimId {
        ClaimId::derive(self.issuer, self.topic)
    }
}

/// Lifecycle state of a pending execution
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStatus {
    /// Awaiting approval
    Requested = 0x01,
    /// Approved and dispatched to the action sink; terminal
    Executed = 0x02,
    /// Denied by an approver; terminal
    Rejected = 0x03,
}

/// A requested action awaiting approval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Execution {
    /// Monotonically increasing identifier
    pub id: ExecutionId,
    /// Target principal of the transfer or call
    pub target: Principal,
    /// Non-negative amount carried by the action
    pub value: u128,
    /// Opaque call payload
    pub payload: Vec<u8>,
    /// Current lifecycle state
    pub status: ExecutionStatus,
    /// Key that requested the execution
    pub requested_by: Principal,
    /// Unix timestamp of the request
    pub requested_at: u64,
    /// Approval record: which keys have acted and their votes
    pub votes: BTreeMap<Principal, bool>,
}

/// Policy applied when `add_key` targets an already-present principal
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyCollisionPolicy {
    /// Fail with `KeyAlreadyExists` (default)
    Reject = 0x01,
    /// Silently overwrite the existing key record
    Replace = 0x02,
}
