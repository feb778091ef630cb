//! OAuth 1.0a three-legged handshake.
//!
//! Issues request tokens, lets a resource owner bind them to an identity and
//! exchanges them for access credentials that resolve back to that identity.
//! Nothing is signed or verified; this is a test double.
//!
//! ## Endpoints
//!
//! - `POST /oauth/request_token` - Temporary credential endpoint
//! - `GET /oauth/authorize` - Authorization page
//! - `POST /oauth/authorize` - Authorization submission
//! - `POST /oauth/access_token` - Token endpoint
//! - `GET /register/{id}/{display_name}` - Registration helper

pub mod access;
pub mod confirm;
pub mod endpoints;
pub mod gate;
pub mod header;
pub mod identity;
pub mod issuer;
pub mod register;
mod state;

pub use access::{AccessCorrelator, AccessGrant};
pub use endpoints::router;
pub use gate::{AuthorizationGate, RedirectDescriptor};
pub use header::{OAuthHeader, credential_from_headers, parse_authorization_header};
pub use identity::IdentityRegistry;
pub use issuer::{RequestTokenPair, TokenIssuer};
pub use state::OAuth1State;

/// OpenAPI tag for OAuth 1.0a endpoints
pub const OAUTH1_TAG: &str = "OAuth1";
