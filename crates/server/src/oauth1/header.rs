//! Parsing of `Authorization: OAuth ...` headers (RFC 5849, section 3.5.1).

use crate::error::CredentialError;
use axum::http::{HeaderMap, header::AUTHORIZATION};
use std::collections::BTreeMap;

/// Protocol parameters carried by an OAuth `Authorization` header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OAuthHeader {
    params: BTreeMap<String, String>,
}

impl OAuthHeader {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn realm(&self) -> Option<&str> {
        self.get("realm")
    }

    /// The `oauth_token` parameter, the credential presented by the client.
    pub fn token(&self) -> Result<&str, CredentialError> {
        self.get("oauth_token").ok_or(CredentialError::MissingToken)
    }
}

/// Parse the value of an `Authorization` header using the OAuth scheme.
///
/// The scheme name is matched case-insensitively. Parameters are
/// comma-separated `name="value"` pairs with percent-encoded values.
pub fn parse_authorization_header(value: &str) -> Result<OAuthHeader, CredentialError> {
    let value = value.trim();
    let (scheme, rest) = value
        .split_once(char::is_whitespace)
        .unwrap_or((value, ""));

    if !scheme.eq_ignore_ascii_case("OAuth") {
        return Err(CredentialError::NotOAuth(scheme.to_string()));
    }

    let mut params = BTreeMap::new();
    for part in rest.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (name, raw) = part
            .split_once('=')
            .ok_or_else(|| CredentialError::Malformed(part.to_string()))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(CredentialError::Malformed(part.to_string()));
        }

        let quoted = raw
            .trim()
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .ok_or_else(|| CredentialError::Malformed(part.to_string()))?;
        let decoded = urlencoding::decode(quoted)
            .map_err(|_| CredentialError::Malformed(part.to_string()))?;

        params.insert(name.to_string(), decoded.into_owned());
    }

    Ok(OAuthHeader { params })
}

/// Extract the bare access credential from request headers.
pub fn credential_from_headers(headers: &HeaderMap) -> Result<String, CredentialError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(CredentialError::Missing)?
        .to_str()
        .map_err(|_| CredentialError::Malformed("non-visible characters in header".into()))?;

    let header = parse_authorization_header(value)?;
    header.token().map(str::to_string)
}
