//! Shared state behind the OAuth 1.0a handshake.
//!
//! Four maps make up the whole state of the fixture: registered identities,
//! pending grants, authorization bindings and access credentials. They are
//! reached through [`HandshakeStore`] so that components never touch ambient
//! globals and tests can hand in their own store.

use crate::entity::{AuthorizationBinding, Identity, PendingGrant};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;

/// Storage for every map the handshake reads and writes.
///
/// Implementations own their synchronization. A write to a single key must be
/// atomic with respect to concurrent readers of that key.
pub trait HandshakeStore: Send + Sync {
    /// Insert or overwrite an identity.
    fn put_identity(&self, identity: Identity);
    fn identity(&self, id: &str) -> Option<Identity>;
    /// Snapshot of all identities, in no particular order.
    fn identities(&self) -> Vec<Identity>;

    /// Insert a pending grant unless the token is already pending.
    ///
    /// Returns `false` when the token was taken.
    fn insert_pending(&self, grant: PendingGrant) -> bool;
    fn pending(&self, request_token: &str) -> Option<PendingGrant>;
    fn pending_count(&self) -> usize;

    /// Insert or overwrite the binding for a request token.
    fn put_binding(&self, binding: AuthorizationBinding);
    fn binding(&self, request_token: &str) -> Option<AuthorizationBinding>;

    /// Map an access credential to an identity id, overwriting any previous mapping.
    fn put_credential(&self, credential: &str, identity_id: &str);
    fn credential(&self, credential: &str) -> Option<String>;
}

/// Shared handle to a store, injected into every component.
pub type SharedStore = Arc<dyn HandshakeStore>;

/// In-memory store, one sharded map per table. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    identities: DashMap<String, Identity>,
    pending: DashMap<String, PendingGrant>,
    bindings: DashMap<String, AuthorizationBinding>,
    credentials: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedStore {
        Arc::new(Self::new())
    }
}

impl HandshakeStore for MemoryStore {
    fn put_identity(&self, identity: Identity) {
        self.identities.insert(identity.id.clone(), identity);
    }

    fn identity(&self, id: &str) -> Option<Identity> {
        self.identities.get(id).map(|entry| entry.value().clone())
    }

    fn identities(&self) -> Vec<Identity> {
        self.identities
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    fn insert_pending(&self, grant: PendingGrant) -> bool {
        match self.pending.entry(grant.request_token.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(grant);
                true
            }
        }
    }

    fn pending(&self, request_token: &str) -> Option<PendingGrant> {
        self.pending
            .get(request_token)
            .map(|entry| entry.value().clone())
    }

    fn pending_count(&self) -> usize {
        self.pending.len()
    }

    fn put_binding(&self, binding: AuthorizationBinding) {
        self.bindings
            .insert(binding.request_token.clone(), binding);
    }

    fn binding(&self, request_token: &str) -> Option<AuthorizationBinding> {
        self.bindings
            .get(request_token)
            .map(|entry| entry.value().clone())
    }

    fn put_credential(&self, credential: &str, identity_id: &str) {
        self.credentials
            .insert(credential.to_string(), identity_id.to_string());
    }

    fn credential(&self, credential: &str) -> Option<String> {
        self.credentials
            .get(credential)
            .map(|entry| entry.value().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grant(token: &str, callback: &str) -> PendingGrant {
        PendingGrant {
            request_token: token.to_string(),
            callback_url: callback.to_string(),
        }
    }

    #[test]
    fn pending_insert_refuses_duplicate_token() {
        let store = MemoryStore::new();
        assert!(store.insert_pending(grant("t1", "https://a/cb")));
        assert!(!store.insert_pending(grant("t1", "https://b/cb")));

        // The first grant is kept untouched
        assert_eq!(store.pending("t1").unwrap().callback_url, "https://a/cb");
        assert_eq!(store.pending_count(), 1);
    }

    #[test]
    fn identities_last_write_wins() {
        let store = MemoryStore::new();
        store.put_identity(Identity::new("1", "john"));
        store.put_identity(Identity::new("1", "jane"));
        store.put_identity(Identity::new("2", "bob"));

        assert_eq!(store.identity("1").unwrap().display_name, "jane");
        assert_eq!(store.identities().len(), 2);
    }

    #[test]
    fn bindings_and_credentials_overwrite() {
        let store = MemoryStore::new();
        store.put_binding(AuthorizationBinding {
            request_token: "t".into(),
            identity_id: "1".into(),
        });
        store.put_binding(AuthorizationBinding {
            request_token: "t".into(),
            identity_id: "2".into(),
        });
        assert_eq!(store.binding("t").unwrap().identity_id, "2");

        store.put_credential("c", "1");
        store.put_credential("c", "3");
        assert_eq!(store.credential("c").as_deref(), Some("3"));
        assert!(store.credential("missing").is_none());
    }
}
