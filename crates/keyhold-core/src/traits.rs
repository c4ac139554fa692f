//! External collaborator trait definitions.
//!
//! These seams keep the core independent of any particular signature scheme
//! or effect dispatcher. Implementations are injected into
//! [`Identity`](crate::identity::Identity).

use crate::types::{ClaimId, Principal};
use keyhold_crypto::{canonicalize_claim_message, verify_signature, PUBLIC_KEY_SIZE, SIGNATURE_SIZE};

/// Performs the actual effect (transfer or call) once an execution is
/// approved.
///
/// Dispatch happens only after the execution record has committed its
/// terminal state, so a sink that calls back into the coordinator observes
/// `InvalidState` rather than re-triggering the same execution.
pub trait ActionSink: Send + Sync {
    /// Carry out the action; returns true on success
    fn dispatch(&self, target: Principal, value: u128, payload: &[u8]) -> bool;
}

/// Validates claim signatures.
///
/// A pure predicate over (subject, topic, signature, data): invalid input of
/// any kind yields `false`, never an error. Revocation policy, if any, lives
/// inside the implementation.
pub trait ClaimVerifier: Send + Sync {
    /// True iff the signature attests `data` about `subject` under `topic`
    fn is_claim_valid(&self, subject: Principal, topic: u32, signature: &[u8], data: &[u8])
        -> bool;
}

/// Revocation policy consulted by [`Ed25519ClaimVerifier`]
///
/// The core does not fix revocation semantics; timestamp-based, list-based,
/// or no revocation at all are all legal policies.
pub trait RevocationPolicy: Send + Sync {
    /// True iff the claim at `claim_id` has been revoked by the issuer
    fn is_revoked(&self, claim_id: ClaimId) -> bool;
}

/// Claim verifier backed by a single issuer's Ed25519 key
///
/// Verifies signatures over the canonical claim message
/// (version || subject || topic || blake3(data)).
pub struct Ed25519ClaimVerifier {
    issuer_public_key: [u8; PUBLIC_KEY_SIZE],
    issuer: Principal,
    revocation: Option<Box<dyn RevocationPolicy>>,
}

impl Ed25519ClaimVerifier {
    /// Create a verifier for claims issued under `issuer_public_key`
    pub fn new(issuer_public_key: [u8; PUBLIC_KEY_SIZE]) -> Self {
        let issuer = Principal::from_public_key(&issuer_public_key);
        Self {
            issuer_public_key,
            issuer,
            revocation: None,
        }
    }

    /// Attach a revocation policy
    pub fn with_revocation(mut self, policy: Box<dyn RevocationPolicy>) -> Self {
        self.revocation = Some(policy);
        self
    }

    /// Principal address of the issuer this verifier answers for
    pub fn issuer(&self) -> Principal {
        self.issuer
    }
}

impl ClaimVerifier for Ed25519ClaimVerifier {
    fn is_claim_valid(
        &self,
        subject: Principal,
        topic: u32,
        signature: &[u8],
        data: &[u8],
    ) -> bool {
        if let Some(policy) = &self.revocation {
            if policy.is_revoked(ClaimId::derive(self.issuer, topic)) {
                return false;
            }
        }

        let signature: [u8; SIGNATURE_SIZE] = match signature.try_into() {
            Ok(bytes) => bytes,
            Err(_) => return false,
        };

        let message = canonicalize_claim_message(subject.as_bytes(), topic, data);
        verify_signature(&self.issuer_public_key, &message, &signature).is_ok()
    }
}

#[cfg(test)]
pub mod mocks {
    use super::*;
    use crate::events::{EventRecord, EventSink};
    use std::sync::Mutex;

    /// Action sink that records every dispatch and returns a fixed result
    pub struct MockActionSink {
        /// Dispatched (target, value, payload) tuples, in order
        pub calls: Mutex<Vec<(Principal, u128, Vec<u8>)>>,
        /// Result reported for every dispatch
        pub result: bool,
    }

    impl MockActionSink {
        /// Sink whose dispatches all succeed
        pub fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                result: true,
            }
        }

        /// Sink whose dispatches all fail
        pub fn failing() -> Self {
            Self {
                result: false,
                ..Self::new()
            }
        }

        /// Number of dispatches observed so far
        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl Default for MockActionSink {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ActionSink for MockActionSink {
        fn dispatch(&self, target: Principal, value: u128, payload: &[u8]) -> bool {
            self.calls
                .lock()
                .unwrap()
                .push((target, value, payload.to_vec()));
            self.result
        }
    }

    /// Claim verifier that accepts every signature
    pub struct AcceptAllVerifier;

    impl ClaimVerifier for AcceptAllVerifier {
        fn is_claim_valid(&self, _: Principal, _: u32, _: &[u8], _: &[u8]) -> bool {
            true
        }
    }

    /// Event sink that records every emitted record
    pub struct RecordingEventSink {
        /// Records in emission order
        pub records: Mutex<Vec<EventRecord>>,
    }

    impl RecordingEventSink {
        /// Empty recorder
        pub fn new() -> Self {
            Self {
                records: Mutex::new(Vec::new()),
            }
        }

        /// Snapshot of the emitted events, envelope stripped
        pub fn events(&self) -> Vec<crate::events::IdentityEvent> {
            self.records
                .lock()
                .unwrap()
                .iter()
                .map(|r| r.event.clone())
                .collect()
        }
    }

    impl Default for RecordingEventSink {
        fn default() -> Self {
            Self::new()
        }
    }

    impl EventSink for RecordingEventSink {
        fn emit(&self, record: EventRecord) {
            self.records.lock().unwrap().push(record);
        }
    }

    /// Revocation policy driven by an explicit list
    pub struct ListRevocation(pub Vec<ClaimId>);

    impl RevocationPolicy for ListRevocation {
        fn is_revoked(&self, claim_id: ClaimId) -> bool {
            self.0.contains(&claim_id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyhold_crypto::{sign_message, SigningKey};

    fn issuer_key() -> SigningKey {
        SigningKey::from_bytes(&[7u8; 32])
    }

    #[test]
    fn test_ed25519_verifier_accepts_valid_claim() {
        let signing_key = issuer_key();
        let verifier = Ed25519ClaimVerifier::new(signing_key.verifying_key().to_bytes());

        let subject = Principal([1u8; 20]);
        let topic = 3;
        let data = b"over 18";

        let message = canonicalize_claim_message(subject.as_bytes(), topic, data);
        let signature = sign_message(&signing_key, &message);

        assert!(verifier.is_claim_valid(subject, topic, &signature, data));
    }

    #[test]
    fn test_ed25519_verifier_rejects_wrong_subject() {
        let signing_key = issuer_key();
        let verifier = Ed25519ClaimVerifier::new(signing_key.verifying_key().to_bytes());

        let subject = Principal([1u8; 20]);
        let message = canonicalize_claim_message(subject.as_bytes(), 3, b"data");
        let signature = sign_message(&signing_key, &message);

        let other_subject = Principal([2u8; 20]);
        assert!(!verifier.is_claim_valid(other_subject, 3, &signature, b"data"));
    }

    #[test]
    fn test_ed25519_verifier_rejects_malformed_signature() {
        let signing_key = issuer_key();
        let verifier = Ed25519ClaimVerifier::new(signing_key.verifying_key().to_bytes());

        let subject = Principal([1u8; 20]);
        // Wrong length: returns false rather than erroring
        assert!(!verifier.is_claim_valid(subject, 3, &[0u8; 10], b"data"));
    }

    #[test]
    fn test_ed25519_verifier_honors_revocation_policy() {
        let signing_key = issuer_key();
        let public_key = signing_key.verifying_key().to_bytes();
        let issuer = Principal::from_public_key(&public_key);

        let topic = 3;
        let subject = Principal([1u8; 20]);
        let message = canonicalize_claim_message(subject.as_bytes(), topic, b"data");
        let signature = sign_message(&signing_key, &message);

        let revoked = mocks::ListRevocation(vec![ClaimId::derive(issuer, topic)]);
        let verifier =
            Ed25519ClaimVerifier::new(public_key).with_revocation(Box::new(revoked));

        assert!(!verifier.is_claim_valid(subject, topic, &signature, b"data"));
        // Other topics from the same issuer remain valid
        let message = canonicalize_claim_message(subject.as_bytes(), topic + 1, b"data");
        let signature = sign_message(&signing_key, &message);
        assert!(verifier.is_claim_valid(subject, topic + 1, &signature, b"data"));
    }
}
