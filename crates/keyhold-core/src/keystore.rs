//! Permission-gated key registry.

use crate::{errors::*, tags, types::*};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Registry of keys allowed to act on behalf of the identity
///
/// Owns the mapping of principals to activity status and permission tags and
/// evaluates "is this caller allowed to perform action X" for every other
/// component. A key with an empty permission set has unrestricted control;
/// a non-empty set restricts the key to exactly those tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionedKeyStore {
    keys: BTreeMap<Principal, Key>,
    collision_policy: KeyCollisionPolicy,
}

impl PermissionedKeyStore {
    /// Create a store seeded with the owner key
    ///
    /// The owner starts active with an empty permission set (full control).
    /// This is the only way a store gains its first key: `add_key` itself
    /// requires ADD_KEY authorization, which nobody would otherwise hold.
    /// No special-cased owner identity exists afterwards.
    pub fn bootstrap(owner: Principal) -> Self {
        Self::with_policy(owner, KeyCollisionPolicy::Reject)
    }

    /// Bootstrap with an explicit key-collision policy
    pub fn with_policy(owner: Principal, collision_policy: KeyCollisionPolicy) -> Self {
        let mut keys = BTreeMap::new();
        keys.insert(owner, Key::new(owner));
        info!("Key store bootstrapped, owner: {}", owner);
        Self {
            keys,
            collision_policy,
        }
    }

    /// The single authorization predicate used by every mutating operation
    /// across all components
    ///
    /// True iff the caller's key is active and its permission set is empty
    /// (full control) or contains `tag`. Evaluated against current state on
    /// every call; results are never cached across the mutation they guard.
    pub fn authorize(&self, caller: Principal, tag: PermissionTag) -> bool {
        match self.keys.get(&caller) {
            Some(key) => key.active && (key.permissions.is_empty() || key.permissions.contains(&tag)),
            None => false,
        }
    }

    /// Typed guard form of [`authorize`](Self::authorize); every mutating
    /// operation starts here and none proceeds past a failure
    pub(crate) fn guard(&self, caller: Principal, tag: PermissionTag) -> Result<()> {
        if self.authorize(caller, tag) {
            Ok(())
        } else {
            warn!("Rejected: caller {} lacks permission {}", caller, tag);
            Err(IdentityError::Unauthorized { caller, tag })
        }
    }

    /// Add a key with full control (empty permission set)
    ///
    /// Requires ADD_KEY. Under the default `Reject` collision policy, adding
    /// a principal that already holds a key fails with `KeyAlreadyExists`;
    /// under `Replace` the existing record is overwritten.
    pub fn add_key(&mut self, caller: Principal, principal: Principal) -> Result<()> {
        self.guard(caller, tags::add_key())?;

        if self.keys.contains_key(&principal) {
            match self.collision_policy {
                KeyCollisionPolicy::Reject => {
                    return Err(IdentityError::KeyAlreadyExists(principal))
                }
                KeyCollisionPolicy::Replace => {
                    debug!("Replacing existing key: {}", principal);
                }
            }
        }

        self.keys.insert(principal, Key::new(principal));
        info!("Key added: {}", principal);
        Ok(())
    }

    /// Hard-delete a key record
    ///
    /// Requires REMOVE_KEY. Fails with `KeyNotFound` if no such key exists.
    pub fn remove_key(&mut self, caller: Principal, principal: Principal) -> Result<()> {
        self.guard(caller, tags::remove_key())?;

        self.keys
            .remove(&principal)
            .ok_or(IdentityError::KeyNotFound(principal))?;

        info!("Key removed: {}", principal);
        Ok(())
    }

    /// Add a tag to a key's permission set
    ///
    /// Requires ASSIGN_PERMISSION. Set semantics: assigning a tag the key
    /// already holds is a no-op success.
    pub fn assign_permission(
        &mut self,
        caller: Principal,
        principal: Principal,
        tag: PermissionTag,
    ) -> Result<()> {
        self.guard(caller, tags::assign_permission())?;

        let key = self
            .keys
            .get_mut(&principal)
            .ok_or(IdentityError::KeyNotFound(principal))?;

        if key.permissions.insert(tag) {
            info!("Permission {} assigned to {}", tag, principal);
        } else {
            debug!("Permission {} already held by {}", tag, principal);
        }
        Ok(())
    }

    /// Remove a tag from a key's permission set
    ///
    /// Requires REVOKE_PERMISSION. Set semantics: revoking an absent tag is
    /// a no-op success. Removing the last tag leaves the set empty, which
    /// restores full control.
    pub fn revoke_permission(
        &mut self,
        caller: Principal,
        principal: Principal,
        tag: PermissionTag,
    ) -> Result<()> {
        self.guard(caller, tags::revoke_permission())?;

        let key = self
            .keys
            .get_mut(&principal)
            .ok_or(IdentityError::KeyNotFound(principal))?;

        if key.permissions.remove(&tag) {
            info!("Permission {} revoked from {}", tag, principal);
        } else {
            debug!("Permission {} not held by {}", tag, principal);
        }
        Ok(())
    }

    /// Look up a key record
    pub fn get_key(&self, principal: Principal) -> Result<&Key> {
        self.keys
            .get(&principal)
            .ok_or(IdentityError::KeyNotFound(principal))
    }

    /// Whether a key exists for the principal
    pub fn has_key(&self, principal: Principal) -> bool {
        self.keys.contains_key(&principal)
    }

    /// Number of keys in the store
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }
}
