//! # keyhold-core
//!
//! An identity record combining three tightly coupled subsystems:
//! - a permission-gated key registry controlling who may act on behalf of
//!   the identity ([`PermissionedKeyStore`])
//! - a claim registry holding attested assertions about the identity
//!   ([`ClaimRegistry`])
//! - a request/approval workflow letting authorized keys jointly trigger an
//!   action on the identity's behalf ([`ExecutionCoordinator`])
//!
//! Every mutating operation passes through the same authorization predicate
//! on the key store and is all-or-nothing: either the state change commits
//! and a notification is emitted, or nothing changes.
//!
//! The [`Identity`] facade wires the three components together with the
//! external collaborators (event sink, action sink, claim verifier, quorum
//! policy).

#![warn(clippy::all)]

pub mod claims;
pub mod errors;
pub mod events;
pub mod execution;
pub mod identity;
pub mod keystore;
pub mod tags;
pub mod traits;
pub mod types;

pub use claims::{ClaimOutcome, ClaimRegistry};
pub use errors::{IdentityError, Result};
pub use events::{EventRecord, EventSink, IdentityEvent, TracingEventSink};
pub use execution::{
    ApprovalResult, ExecutionCoordinator, QuorumPolicy, SingleApproval, Threshold,
};
pub use identity::Identity;
pub use keystore::PermissionedKeyStore;
pub use traits::{ActionSink, ClaimVerifier, Ed25519ClaimVerifier, RevocationPolicy};
pub use types::*;
