//! OAuth 1.0a state management.
//!
//! Wires the handshake components to one shared store.

use crate::oauth1::access::AccessCorrelator;
use crate::oauth1::gate::AuthorizationGate;
use crate::oauth1::identity::IdentityRegistry;
use crate::oauth1::issuer::TokenIssuer;
use crate::store::SharedStore;

/// Components of the handshake, cheap to clone into every handler.
#[derive(Clone)]
pub struct OAuth1State {
    pub registry: IdentityRegistry,
    pub issuer: TokenIssuer,
    pub gate: AuthorizationGate,
    pub correlator: AccessCorrelator,
}

impl OAuth1State {
    pub fn new(store: SharedStore, token_secret: &str) -> Self {
        let registry = IdentityRegistry::new(store.clone());
        Self {
            issuer: TokenIssuer::new(store.clone(), token_secret),
            gate: AuthorizationGate::new(store.clone(), registry.clone()),
            correlator: AccessCorrelator::new(store, registry.clone(), token_secret),
            registry,
        }
    }
}
