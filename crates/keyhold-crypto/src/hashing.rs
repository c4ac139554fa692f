//! Identifier derivation using BLAKE3.
//!
//! Every fixed-width identifier in keyhold (principal addresses, permission
//! tags, claim ids) is a BLAKE3 digest or a prefix of one. Derivations take
//! only public inputs, so any external reader can reproduce them.

use crate::constants::*;
use blake3::Hasher as Blake3Hasher;

/// Hash data using BLAKE3
pub fn blake3_hash(data: &[u8]) -> [u8; DIGEST_SIZE] {
    let mut hasher = Blake3Hasher::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Derive a principal address from an Ed25519 public key
///
/// Returns the first 20 bytes of the BLAKE3 hash of the public key.
pub fn derive_principal(public_key: &[u8; PUBLIC_KEY_SIZE]) -> [u8; PRINCIPAL_SIZE] {
    let hash = blake3_hash(public_key);
    let mut principal = [0u8; PRINCIPAL_SIZE];
    principal.copy_from_slice(&hash[..PRINCIPAL_SIZE]);
    principal
}

/// Derive a permission tag from its canonical name
///
/// Tags are compared by value only, so the derivation must be stable across
/// deployments: "ADD_KEY" names the same tag everywhere.
pub fn derive_permission_tag(name: &str) -> [u8; DIGEST_SIZE] {
    blake3_hash(name.as_bytes())
}

/// Derive a claim id from (issuer, topic)
///
/// Preimage format: version(1) || issuer(20) || topic(4, big-endian)
///
/// Total: 25 bytes. The id is a pure function of issuer and topic, which is
/// what enforces the at-most-one-live-claim-per-pair rule.
pub fn derive_claim_id(issuer: &[u8; PRINCIPAL_SIZE], topic: u32) -> [u8; DIGEST_SIZE] {
    let mut preimage = [0u8; CLAIM_ID_PREIMAGE_SIZE];

    preimage[0] = 0x01; // Version
    preimage[1..21].copy_from_slice(issuer);
    preimage[21..25].copy_from_slice(&topic.to_be_bytes());

    blake3_hash(&preimage)
}
