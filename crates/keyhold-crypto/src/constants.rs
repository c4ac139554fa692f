//! Cryptographic constants.

/// Ed25519 public key size in bytes
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Ed25519 signature size in bytes
pub const SIGNATURE_SIZE: usize = 64;

/// Principal address size in bytes
pub const PRINCIPAL_SIZE: usize = 20;

/// BLAKE3 digest size in bytes
pub const DIGEST_SIZE: usize = 32;

/// Claim-id preimage size in bytes: version(1) || issuer(20) || topic(4)
pub const CLAIM_ID_PREIMAGE_SIZE: usize = 25;

/// Canonical claim signing message size in bytes
pub const CLAIM_MESSAGE_SIZE: usize = 57;
