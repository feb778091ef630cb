use thiserror::Error;

/// Failure to extract an OAuth credential from a presented `Authorization` header.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("No Authorization header present")]
    Missing,
    #[error("Authorization scheme is not OAuth: {0}")]
    NotOAuth(String),
    #[error("Malformed OAuth parameter: {0}")]
    Malformed(String),
    #[error("OAuth header carries no oauth_token parameter")]
    MissingToken,
}

impl CredentialError {
    /// The `oauth_problem` value reported back to the client (OAuth Problem Reporting extension).
    pub fn oauth_problem(&self) -> &'static str {
        match self {
            CredentialError::Missing | CredentialError::MissingToken => "parameter_absent",
            CredentialError::NotOAuth(_) | CredentialError::Malformed(_) => "parameter_rejected",
        }
    }
}

/// Hard failures of the handshake core.
///
/// Missing data never ends up here; lookups degrade to placeholders instead.
/// Only a store that contradicts itself is reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandshakeError {
    #[error(
        "Store inconsistency: request token {request_token} is bound to identity {identity_id} but no access credential maps to it"
    )]
    InconsistentStore {
        request_token: String,
        identity_id: String,
    },
}
