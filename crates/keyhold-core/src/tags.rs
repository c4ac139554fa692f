//! Canonical permission tags.
//!
//! Each tag gates one category of mutating operation. Tags are derived from
//! fixed name strings so that independent deployments agree on tag values
//! without sharing state. Custom tags beyond these eight are legal and
//! opaque to the key store.

use crate::types::PermissionTag;

/// Canonical name for the tag gating `add_key`
pub const ADD_KEY: &str = "ADD_KEY";
/// Canonical name for the tag gating `remove_key`
pub const REMOVE_KEY: &str = "REMOVE_KEY";
/// Canonical name for the tag gating `assign_permission`
pub const ASSIGN_PERMISSION: &str = "ASSIGN_PERMISSION";
/// Canonical name for the tag gating `revoke_permission`
pub const REVOKE_PERMISSION: &str = "REVOKE_PERMISSION";
/// Canonical name for the tag gating `add_claim`
pub const ADD_CLAIM: &str = "ADD_CLAIM";
/// Canonical name for the tag gating `remove_claim`
pub const REMOVE_CLAIM: &str = "REMOVE_CLAIM";
/// Canonical name for the tag gating `request` (execution)
pub const EXECUTE: &str = "EXECUTE";
/// Canonical name for the tag gating `approve`
pub const APPROVE: &str = "APPROVE";

/// Tag gating `add_key`
pub fn add_key() -> PermissionTag {
    PermissionTag::from_name(ADD_KEY)
}

/// Tag gating `remove_key`
pub fn remove_key() -> PermissionTag {
    PermissionTag::from_name(REMOVE_KEY)
}

/// Tag gating `assign_permission`
pub fn assign_permission() -> PermissionTag {
    PermissionTag::from_name(ASSIGN_PERMISSION)
}

/// Tag gating `revoke_permission`
pub fn revoke_permission() -> PermissionTag {
    PermissionTag::from_name(REVOKE_PERMISSION)
}

/// Tag gating `add_claim`
pub fn add_claim() -> PermissionTag {
    PermissionTag::from_name(ADD_CLAIM)
}

/// Tag gating `remove_claim`
pub fn remove_claim() -> PermissionTag {
    PermissionTag::from_name(REMOVE_CLAIM)
}

/// Tag gating execution requests
pub fn execute() -> PermissionTag {
    PermissionTag::from_name(EXECUTE)
}

/// Tag gating approvals
pub fn approve() -> PermissionTag {
    PermissionTag::from_name(APPROVE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_tags_are_distinct() {
        let all = [
            add_key(),
            remove_key(),
            assign_permission(),
            revoke_permission(),
            add_claim(),
            remove_claim(),
            execute(),
            approve(),
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_tags_match_name_derivation() {
        assert_eq!(add_key(), PermissionTag::from_name("ADD_KEY"));
        assert_eq!(approve(), PermissionTag::from_name("APPROVE"));
    }
}
