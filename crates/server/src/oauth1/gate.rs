//! Resource owner authorization of request tokens.

use crate::entity::{AuthorizationBinding, Identity};
use crate::oauth1::identity::IdentityRegistry;
use crate::store::SharedStore;
use sha2::{Digest, Sha256};

/// Callback value meaning "out of band": there is nowhere to redirect to.
pub const OUT_OF_BAND: &str = "oob";

/// Everything the confirmation step needs to let the owner authorize a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectDescriptor {
    pub request_token: String,
    /// Empty when the token was never issued.
    pub callback_url: String,
    pub verifier: String,
    pub identities: Vec<Identity>,
}

impl RedirectDescriptor {
    /// The callback URL with `oauth_token` and `oauth_verifier` appended.
    ///
    /// `None` when there is no callback to return to.
    pub fn redirect_url(&self) -> Option<String> {
        if self.callback_url.is_empty() || self.callback_url == OUT_OF_BAND {
            return None;
        }

        let mut url = self.callback_url.clone();
        if !url.ends_with('?') && !url.ends_with('&') {
            url.push(if url.contains('?') { '&' } else { '?' });
        }
        url.push_str(&format!(
            "oauth_token={}&oauth_verifier={}",
            urlencoding::encode(&self.request_token),
            urlencoding::encode(&self.verifier)
        ));
        Some(url)
    }
}

/// Verifier for a request token: the first 20 hex digits of its SHA-256.
pub fn verifier_for(request_token: &str) -> String {
    Sha256::digest(request_token.as_bytes())
        .iter()
        .take(10)
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

/// Binds request tokens to identities on behalf of the resource owner.
#[derive(Clone)]
pub struct AuthorizationGate {
    store: SharedStore,
    registry: IdentityRegistry,
}

impl AuthorizationGate {
    pub fn new(store: SharedStore, registry: IdentityRegistry) -> Self {
        Self { store, registry }
    }

    /// Gather the data for the confirmation step. Never fails: an unknown
    /// token yields an empty callback.
    pub fn begin_authorization(&self, request_token: &str) -> RedirectDescriptor {
        let callback_url = match self.store.pending(request_token) {
            Some(grant) => grant.callback_url,
            None => {
                tracing::debug!(request_token = %request_token, "No pending grant for request token");
                String::new()
            }
        };

        RedirectDescriptor {
            request_token: request_token.to_string(),
            callback_url,
            verifier: verifier_for(request_token),
            identities: self.registry.all(),
        }
    }

    /// Register (or update) an identity and make its access credential
    /// resolvable, without authorizing any request token.
    pub fn register_identity(&self, identity_id: &str, display_name: &str) -> Identity {
        let identity = self.registry.register(identity_id, display_name);
        // Access credential == identity id
        self.store.put_credential(identity_id, identity_id);
        identity
    }

    /// Register (or update) the identity and bind the request token to it.
    ///
    /// Repeating the call overwrites the binding; the last identity wins.
    /// The returned descriptor carries no identity list.
    pub fn complete_authorization(
        &self,
        request_token: &str,
        identity_id: &str,
        display_name: &str,
    ) -> RedirectDescriptor {
        // Credential first: a visible binding always has its credential
        self.register_identity(identity_id, display_name);
        self.store.put_binding(AuthorizationBinding {
            request_token: request_token.to_string(),
            identity_id: identity_id.to_string(),
        });

        tracing::info!(
            request_token = %request_token,
            identity_id = %identity_id,
            "Request token authorized"
        );

        RedirectDescriptor {
            request_token: request_token.to_string(),
            callback_url: self
                .store
                .pending(request_token)
                .map(|grant| grant.callback_url)
                .unwrap_or_default(),
            verifier: verifier_for(request_token),
            identities: Vec::new(),
        }
    }
}
