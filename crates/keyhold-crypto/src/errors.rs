//! Crypto error types.

use thiserror::Error;

/// Cryptographic errors
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Malformed Ed25519 public key
    #[error("Invalid Ed25519 public key: {0}")]
    InvalidPublicKey(String),

    /// Signature did not verify against the message
    #[error("Signature verification failed")]
    SignatureVerificationFailed,

    /// Signature bytes have the wrong length
    #[error("Invalid signature length: expected {expected}, got {actual}")]
    InvalidSignatureLength {
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },
}

/// Result type for cryptographic operations
pub type Result<T> = std::result::Result<T, CryptoError>;
