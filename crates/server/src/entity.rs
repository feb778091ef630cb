//! Records held by the handshake store.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A registered user of the simulated mapping service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Identity {
    pub id: String,
    pub display_name: String,
}

impl Identity {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

/// A request token waiting for the resource owner to authorize it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingGrant {
    pub request_token: String,
    pub callback_url: String,
}

/// Record that a request token was approved for an identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationBinding {
    pub request_token: String,
    pub identity_id: String,
}
