//! Registry of known identities.

use crate::entity::Identity;
use crate::store::SharedStore;

/// Known users of the simulated service, keyed by caller-chosen id.
#[derive(Clone)]
pub struct IdentityRegistry {
    store: SharedStore,
}

impl IdentityRegistry {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Insert or overwrite an identity. No validation is applied to either field.
    pub fn register(&self, id: &str, display_name: &str) -> Identity {
        let identity = Identity::new(id, display_name);
        self.store.put_identity(identity.clone());
        tracing::info!(id = %id, display_name = %display_name, "Registered identity");
        identity
    }

    pub fn lookup(&self, id: &str) -> Option<Identity> {
        self.store.identity(id)
    }

    /// Find an identity id by display name.
    ///
    /// When several identities share a display name, which one is returned is
    /// unspecified.
    pub fn lookup_id_by_display_name(&self, display_name: &str) -> Option<String> {
        self.store
            .identities()
            .into_iter()
            .find(|identity| identity.display_name == display_name)
            .map(|identity| identity.id)
    }

    /// All identities, ordered by id.
    pub fn all(&self) -> Vec<Identity> {
        let mut identities = self.store.identities();
        identities.sort_by(|a, b| a.id.cmp(&b.id));
        identities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn register_then_lookup() {
        let registry = IdentityRegistry::new(MemoryStore::shared());
        registry.register("1", "john");

        assert_eq!(registry.lookup("1"), Some(Identity::new("1", "john")));
        assert_eq!(registry.lookup("2"), None);
    }

    #[test]
    fn register_overwrites_existing_id() {
        let registry = IdentityRegistry::new(MemoryStore::shared());
        registry.register("1", "john");
        registry.register("2", "bob");
        registry.register("1", "jane");

        assert_eq!(registry.lookup("1").unwrap().display_name, "jane");
        assert_eq!(registry.lookup("2").unwrap().display_name, "bob");
    }

    #[test]
    fn lookup_by_display_name() {
        let registry = IdentityRegistry::new(MemoryStore::shared());
        registry.register("7", "alice");
        registry.register("8", "bob");

        assert_eq!(
            registry.lookup_id_by_display_name("bob").as_deref(),
            Some("8")
        );
        assert!(registry.lookup_id_by_display_name("carol").is_none());
    }

    #[test]
    fn shared_display_name_resolves_to_one_of_them() {
        let registry = IdentityRegistry::new(MemoryStore::shared());
        registry.register("1", "twin");
        registry.register("2", "twin");

        let id = registry.lookup_id_by_display_name("twin").unwrap();
        assert!(id == "1" || id == "2");
    }

    #[test]
    fn all_is_sorted_by_id() {
        let registry = IdentityRegistry::new(MemoryStore::shared());
        registry.register("b", "second");
        registry.register("a", "first");

        let ids: Vec<_> = registry.all().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
