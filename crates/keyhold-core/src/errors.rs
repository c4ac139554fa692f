//! Identity error types.

use crate::types::{ClaimId, ExecutionId, ExecutionStatus, PermissionTag, Principal};
use thiserror::Error;

/// Errors raised by mutating operations on the identity record
///
/// Validation failures of claim signatures are not represented here:
/// `is_claim_valid` reports them as a boolean, never as an error.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The authorization predicate rejected the caller for this operation
    #[error("Caller {caller} is not authorized for permission {tag}")]
    Unauthorized {
        /// Principal that attempted the operation
        caller: Principal,
        /// Tag required by the operation
        tag: PermissionTag,
    },

    /// No key exists for the principal
    #[error("Key not found: {0}")]
    KeyNotFound(Principal),

    /// A key already exists for the principal
    #[error("Key already exists: {0}")]
    KeyAlreadyExists(Principal),

    /// No claim exists at the id
    #[error("Claim not found: {0}")]
    ClaimNotFound(ClaimId),

    /// No execution exists at the id
    #[error("Execution not found: {0}")]
    ExecutionNotFound(ExecutionId),

    /// Approval attempted on a record that already left the Requested state
    #[error("Execution {id} is terminal: status={status:?}")]
    InvalidState {
        /// Execution identifier
        id: ExecutionId,
        /// Status the record was found in
        status: ExecutionStatus,
    },

    /// Cryptographic error
    #[error("Cryptographic error: {0}")]
    Crypto(#[from] keyhold_crypto::CryptoError),
}

/// Result type for identity operations
pub type Result<T> = std::result::Result<T, IdentityError>;
