//! A deterministic OAuth 1.0a test double for OpenStreetMap clients.
//!
//! This library emulates the three-legged OAuth 1.0a handshake of the
//! OpenStreetMap website together with a small slice of its API 0.6, so that
//! editors can be developed and tested without a real identity provider.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::oauth1::OAuth1State;
use crate::osm::ResourceFacade;
use crate::store::{MemoryStore, SharedStore};

pub mod api;
pub mod config;
pub mod entity;
pub mod error;
pub mod oauth1;
pub mod osm;
pub mod store;

#[derive(Clone)]
pub struct AppResources {
    pub oauth: OAuth1State,
    pub osm: ResourceFacade,
    pub config: Arc<AppConfig>,
}

impl AppResources {
    /// Build every component on top of `store` and register the configured
    /// seed identities.
    pub fn new(config: Arc<AppConfig>, store: SharedStore) -> Self {
        let oauth = OAuth1State::new(store, &config.token_secret);
        for seed in &config.seed_identities {
            oauth.gate.register_identity(&seed.id, &seed.display_name);
        }
        let osm = ResourceFacade::new(oauth.registry.clone(), config.account.clone());

        Self { oauth, osm, config }
    }

    /// Resources backed by a fresh [`MemoryStore`].
    pub fn in_memory(config: AppConfig) -> Self {
        Self::new(Arc::new(config), MemoryStore::shared())
    }
}
