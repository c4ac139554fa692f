//! End-to-end flows against the public surface: bootstrap, delegation,
//! claims with real Ed25519 signatures, and the execution workflow.

use keyhold_core::{
    tags, ActionSink, Claim, ClaimId, Ed25519ClaimVerifier, EventRecord, EventSink,
    ExecutionStatus, Identity, IdentityError, IdentityEvent, Principal, SingleApproval, Threshold,
};
use keyhold_crypto::{canonicalize_claim_message, sign_message, SigningKey};
use std::sync::{Arc, Mutex};

struct RecordingSink {
    records: Mutex<Vec<EventRecord>>,
}

impl RecordingSink {
    fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    fn events(&self) -> Vec<IdentityEvent> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.event.clone())
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, record: EventRecord) {
        self.records.lock().unwrap().push(record);
    }
}

struct LedgerSink {
    dispatches: Mutex<Vec<(Principal, u128, Vec<u8>)>>,
}

impl LedgerSink {
    fn new() -> Self {
        Self {
            dispatches: Mutex::new(Vec::new()),
        }
    }
}

impl ActionSink for LedgerSink {
    fn dispatch(&self, target: Principal, value: u128, payload: &[u8]) -> bool {
        self.dispatches
            .lock()
            .unwrap()
            .push((target, value, payload.to_vec()));
        true
    }
}

fn principal(n: u8) -> Principal {
    Principal([n; 20])
}

#[test]
fn test_full_identity_lifecycle_with_signed_claims() {
    // Issuer whose signatures the identity trusts for claims
    let issuer_key = SigningKey::from_bytes(&[11u8; 32]);
    let issuer_public = issuer_key.verifying_key().to_bytes();
    let issuer = Principal::from_public_key(&issuer_public);

    let owner = principal(1);
    let subject = owner; // claims are about the identity itself

    let events = Arc::new(RecordingSink::new());
    let ledger = Arc::new(LedgerSink::new());
    let verifier = Arc::new(Ed25519ClaimVerifier::new(issuer_public));

    let mut identity = Identity::new(
        owner,
        events.clone(),
        ledger.clone(),
        verifier,
        Arc::new(SingleApproval),
    );

    // --- delegation ---
    let device = principal(2);
    identity.add_key(owner, device).unwrap();
    assert!(identity.authorize(device, tags::add_claim()));

    // --- signed claim ---
    let topic = 42;
    let data = b"kyc level 2".to_vec();
    let message = canonicalize_claim_message(subject.as_bytes(), topic, &data);
    let signature = sign_message(&issuer_key, &message).to_vec();

    assert!(identity.is_claim_valid(subject, topic, &signature, &data));

    let claim_id = identity
        .add_claim(
            device,
            Claim {
                topic,
                scheme: 1,
                issuer,
                signature: signature.clone(),
                data: data.clone(),
                uri: None,
            },
        )
        .unwrap();

    assert_eq!(claim_id, ClaimId::derive(issuer, topic));
    assert!(identity.claim_ids_by_topic(topic).contains(&claim_id));

    // Tampered data fails validation but is a boolean outcome, not an error
    assert!(!identity.is_claim_valid(subject, topic, &signature, b"kyc level 9"));

    // --- execution ---
    let target = principal(9);
    let execution_id = identity
        .request_execution(device, target, 250, b"transfer".to_vec())
        .unwrap();
    assert_eq!(execution_id, 1);

    let dispatched = identity.approve(device, execution_id, true).unwrap();
    assert!(dispatched);
    assert_eq!(
        ledger.dispatches.lock().unwrap().as_slice(),
        &[(target, 250, b"transfer".to_vec())]
    );

    // --- notifications observed in order ---
    let kinds: Vec<&str> = events
        .events()
        .iter()
        .map(|e| match e {
            IdentityEvent::KeyAdded { .. } => "key_added",
            IdentityEvent::ClaimAdded { .. } => "claim_added",
            IdentityEvent::ExecutionRequested { .. } => "execution_requested",
            IdentityEvent::Approved { .. } => "approved",
            IdentityEvent::Executed { .. } => "executed",
            _ => "other",
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            "key_added",
            "claim_added",
            "execution_requested",
            "approved",
            "executed",
        ]
    );
}

#[test]
fn test_threshold_quorum_requires_two_distinct_approvers() {
    let owner = principal(1);
    let events = Arc::new(RecordingSink::new());
    let ledger = Arc::new(LedgerSink::new());
    let issuer_key = SigningKey::from_bytes(&[12u8; 32]);

    let mut identity = Identity::new(
        owner,
        events,
        ledger.clone(),
        Arc::new(Ed25519ClaimVerifier::new(
            issuer_key.verifying_key().to_bytes(),
        )),
        Arc::new(Threshold(2)),
    );

    let cosigner = principal(2);
    identity.add_key(owner, cosigner).unwrap();

    let id = identity
        .request_execution(owner, principal(9), 1, vec![])
        .unwrap();

    // First approval: quorum pending, no dispatch, record still Requested
    assert!(!identity.approve(owner, id, true).unwrap());
    assert_eq!(
        identity.get_execution(id).unwrap().status,
        ExecutionStatus::Requested
    );
    assert!(ledger.dispatches.lock().unwrap().is_empty());

    // Second distinct approver satisfies the quorum
    assert!(identity.approve(cosigner, id, true).unwrap());
    assert_eq!(
        identity.get_execution(id).unwrap().status,
        ExecutionStatus::Executed
    );
    assert_eq!(ledger.dispatches.lock().unwrap().len(), 1);

    // Terminal: any further vote is an invalid-state error
    assert!(matches!(
        identity.approve(owner, id, false).unwrap_err(),
        IdentityError::InvalidState { .. }
    ));
}

#[test]
fn test_removed_key_loses_all_authority() {
    let owner = principal(1);
    let issuer_key = SigningKey::from_bytes(&[13u8; 32]);
    let mut identity = Identity::new(
        owner,
        Arc::new(RecordingSink::new()),
        Arc::new(LedgerSink::new()),
        Arc::new(Ed25519ClaimVerifier::new(
            issuer_key.verifying_key().to_bytes(),
        )),
        Arc::new(SingleApproval),
    );

    let device = principal(2);
    identity.add_key(owner, device).unwrap();
    identity.remove_key(owner, device).unwrap();

    assert!(!identity.authorize(device, tags::execute()));
    assert!(matches!(
        identity
            .request_execution(device, principal(9), 0, vec![])
            .unwrap_err(),
        IdentityError::Unauthorized { .. }
    ));
    assert!(matches!(
        identity.get_key(device).unwrap_err(),
        IdentityError::KeyNotFound(_)
    ));
}
