//! OpenAPI/Utoipa configuration.

use crate::api::{health::MISC_TAG, osm::OSM_TAG};
use crate::oauth1::OAUTH1_TAG;
use utoipa::{
    Modify, OpenApi,
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
};

/// Security addon for OpenAPI documentation.
pub struct SecurityAddon;

impl Modify for SecurityAddon {
    #[tracing::instrument(skip(self, openapi))]
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        // OAuth 1.0a credentials travel in the Authorization header
        let oauth1 = ApiKey::Header(ApiKeyValue::with_description(
            "Authorization",
            "`OAuth oauth_token=\"<access token>\", ...` as obtained from `/oauth/access_token`. \
             Signatures are not checked.",
        ));
        components.add_security_scheme("oauth1", SecurityScheme::ApiKey(oauth1));
    }
}

/// OpenAPI documentation configuration.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "OSM OAuth Fixture API",
        version = "1.0.0",
        description = "Deterministic OAuth 1.0a handshake and OpenStreetMap API test double."
    ),
    tags(
        (name = MISC_TAG, description = "Miscellaneous endpoints"),
        (name = OAUTH1_TAG, description = "OAuth 1.0a handshake endpoints"),
        (name = OSM_TAG, description = "OpenStreetMap API 0.6 resources")
    )
)]
pub struct ApiDoc;
