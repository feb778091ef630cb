//! Request token issuance.

use crate::entity::PendingGrant;
use crate::store::SharedStore;
use serde::Serialize;
use utoipa::ToSchema;

/// Token pair handed to the consumer at the start of the handshake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RequestTokenPair {
    pub oauth_token: String,
    pub oauth_token_secret: String,
    pub oauth_callback_confirmed: bool,
}

impl RequestTokenPair {
    /// Form-encoded body as returned by `/oauth/request_token`.
    pub fn to_form_body(&self) -> String {
        format!(
            "oauth_token={}&oauth_token_secret={}&oauth_callback_confirmed={}",
            urlencoding::encode(&self.oauth_token),
            urlencoding::encode(&self.oauth_token_secret),
            self.oauth_callback_confirmed
        )
    }
}

/// Generate a random URL-safe token.
pub fn generate_token() -> String {
    use base64::Engine;
    let mut bytes = [0u8; 32];
    getrandom::fill(&mut bytes).expect("Failed to generate random bytes");
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// Issues request tokens and records their pending grants.
#[derive(Clone)]
pub struct TokenIssuer {
    store: SharedStore,
    token_secret: String,
}

impl TokenIssuer {
    pub fn new(store: SharedStore, token_secret: impl Into<String>) -> Self {
        Self {
            store,
            token_secret: token_secret.into(),
        }
    }

    /// Issue a request token that is not pending yet and remember where to
    /// send the owner once it is authorized.
    pub fn issue_request_token(&self, callback_url: &str) -> RequestTokenPair {
        let request_token = loop {
            let candidate = generate_token();
            let grant = PendingGrant {
                request_token: candidate.clone(),
                callback_url: callback_url.to_string(),
            };
            if self.store.insert_pending(grant) {
                break candidate;
            }
            tracing::warn!("Request token collision, regenerating");
        };

        tracing::info!(
            request_token = %request_token,
            callback_url = %callback_url,
            "Issued request token"
        );

        RequestTokenPair {
            oauth_token: request_token,
            oauth_token_secret: self.token_secret.clone(),
            oauth_callback_confirmed: true,
        }
    }
}
