//! Exchange of authorized request tokens and resolution of access credentials.

use crate::entity::Identity;
use crate::error::HandshakeError;
use crate::oauth1::identity::IdentityRegistry;
use crate::store::SharedStore;
use serde::Serialize;
use utoipa::ToSchema;

/// Access credential returned by `/oauth/access_token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AccessGrant {
    pub oauth_token: String,
    pub oauth_token_secret: String,
}

impl AccessGrant {
    pub fn to_form_body(&self) -> String {
        format!(
            "oauth_token={}&oauth_token_secret={}",
            urlencoding::encode(&self.oauth_token),
            urlencoding::encode(&self.oauth_token_secret)
        )
    }
}

#[derive(Clone)]
pub struct AccessCorrelator {
    store: SharedStore,
    registry: IdentityRegistry,
    token_secret: String,
}

impl AccessCorrelator {
    pub fn new(
        store: SharedStore,
        registry: IdentityRegistry,
        token_secret: impl Into<String>,
    ) -> Self {
        Self {
            store,
            registry,
            token_secret: token_secret.into(),
        }
    }

    /// Exchange a request token for the access credential of the identity it
    /// is bound to.
    ///
    /// An unbound token yields an empty credential, which resolves to nobody.
    pub fn exchange(&self, request_token: &str) -> Result<AccessGrant, HandshakeError> {
        let credential = match self.store.binding(request_token) {
            Some(binding) => {
                if self.store.credential(&binding.identity_id).is_none() {
                    tracing::error!(
                        request_token = %request_token,
                        identity_id = %binding.identity_id,
                        "Binding without access credential"
                    );
                    return Err(HandshakeError::InconsistentStore {
                        request_token: request_token.to_string(),
                        identity_id: binding.identity_id,
                    });
                }
                binding.identity_id
            }
            None => {
                tracing::debug!(request_token = %request_token, "Exchange of unauthorized request token");
                String::new()
            }
        };

        tracing::info!(request_token = %request_token, credential = %credential, "Exchanged request token");

        Ok(AccessGrant {
            oauth_token: credential,
            oauth_token_secret: self.token_secret.clone(),
        })
    }

    /// Resolve a presented access credential back to its identity.
    pub fn resolve(&self, credential: &str) -> Option<Identity> {
        let identity_id = self.store.credential(credential)?;
        let identity = self.registry.lookup(&identity_id);
        if identity.is_none() {
            tracing::debug!(identity_id = %identity_id, "Credential maps to unregistered identity");
        }
        identity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::AuthorizationBinding;
    use crate::oauth1::gate::AuthorizationGate;
    use crate::store::{HandshakeStore, MemoryStore};
    use std::sync::Arc;

    fn setup() -> (Arc<MemoryStore>, AuthorizationGate, AccessCorrelator) {
        let store = Arc::new(MemoryStore::new());
        let registry = IdentityRegistry::new(store.clone());
        let gate = AuthorizationGate::new(store.clone(), registry.clone());
        let correlator = AccessCorrelator::new(store.clone(), registry, "bar");
        (store, gate, correlator)
    }

    #[test]
    fn exchange_then_resolve_yields_authorizing_identity() {
        let (_, gate, correlator) = setup();
        gate.complete_authorization("t1", "1", "john");

        let grant = correlator.exchange("t1").unwrap();
        assert_eq!(grant.oauth_token, "1");
        assert_eq!(grant.oauth_token_secret, "bar");
        assert_eq!(
            correlator.resolve(&grant.oauth_token),
            Some(Identity::new("1", "john"))
        );
    }

    #[test]
    fn exchange_unbound_token_is_empty_and_unknown() {
        let (_, _, correlator) = setup();

        let grant = correlator.exchange("never-authorized").unwrap();
        assert_eq!(grant.oauth_token, "");
        assert_eq!(correlator.resolve(&grant.oauth_token), None);
    }

    #[test]
    fn earlier_credential_survives_reauthorization_of_shared_token() {
        let (_, gate, correlator) = setup();
        gate.complete_authorization("shared", "1", "john");
        let first = correlator.exchange("shared").unwrap();

        gate.complete_authorization("shared", "2", "jane");
        let second = correlator.exchange("shared").unwrap();

        assert_eq!(correlator.resolve(&first.oauth_token).unwrap().id, "1");
        assert_eq!(correlator.resolve(&second.oauth_token).unwrap().id, "2");
    }

    #[test]
    fn binding_without_credential_is_inconsistent() {
        let (store, _, correlator) = setup();
        store.put_binding(AuthorizationBinding {
            request_token: "t".into(),
            identity_id: "9".into(),
        });

        assert_eq!(
            correlator.exchange("t"),
            Err(HandshakeError::InconsistentStore {
                request_token: "t".into(),
                identity_id: "9".into(),
            })
        );
    }

    #[test]
    fn resolve_unregistered_identity_is_unknown() {
        let (store, _, correlator) = setup();
        store.put_credential("ghost", "ghost");
        assert_eq!(correlator.resolve("ghost"), None);
    }

    #[test]
    fn access_grant_form_body() {
        let grant = AccessGrant {
            oauth_token: "1".into(),
            oauth_token_secret: "bar".into(),
        };
        assert_eq!(grant.to_form_body(), "oauth_token=1&oauth_token_secret=bar");
    }
}
