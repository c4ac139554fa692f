//! Digital signature operations using Ed25519.

use crate::{constants::*, errors::*, hashing::blake3_hash};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};

/// Sign a message with Ed25519
///
/// # Returns
///
/// 64-byte Ed25519 signature
pub fn sign_message(signing_key: &SigningKey, message: &[u8]) -> [u8; SIGNATURE_SIZE] {
    let signature = signing_key.sign(message);
    signature.to_bytes()
}

/// Verify an Ed25519 signature
///
/// # Returns
///
/// `Ok(())` if the signature is valid, `Err` otherwise
pub fn verify_signature(
    public_key: &[u8; PUBLIC_KEY_SIZE],
    message: &[u8],
    signature: &[u8; SIGNATURE_SIZE],
) -> Result<()> {
    let verifying_key = VerifyingKey::from_bytes(public_key)
        .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))?;

    let sig = Signature::from_bytes(signature);

    verifying_key
        .verify(message, &sig)
        .map_err(|_| CryptoError::SignatureVerificationFailed)
}

/// Create the canonical binary message a claim issuer signs
///
/// Format: version(1) || subject(20) || topic(4, big-endian) || blake3(data)(32)
///
/// Total: 57 bytes. The data digest keeps the message fixed-width regardless
/// of payload size.
pub fn canonicalize_claim_message(
    subject: &[u8; PRINCIPAL_SIZE],
    topic: u32,
    data: &[u8],
) -> [u8; CLAIM_MESSAGE_SIZE] {
    let mut message = [0u8; CLAIM_MESSAGE_SIZE];

    message[0] = 0x01; // Version
    message[1..21].copy_from_slice(subject);
    message[21..25].copy_from_slice(&topic.to_be_bytes());
    message[25..57].copy_from_slice(&blake3_hash(data));

    message
}
