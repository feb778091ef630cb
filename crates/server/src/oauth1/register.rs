//! Registration helper.
//!
//! Side channel for test setups: registers an identity and, when a request
//! token is given, authorizes it in the same step without going through the
//! authorization page.

use crate::entity::Identity;
use crate::oauth1::{OAUTH1_TAG, state::OAuth1State};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};

#[derive(Debug, Deserialize)]
pub struct RegisterQuery {
    pub oauth_token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub identity: Identity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oauth_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oauth_verifier: Option<String>,
}

/// Creates the registration helper router.
pub fn router(state: OAuth1State) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(register))
        .with_state(state)
}

/// Register an identity, optionally binding a request token to it.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/register/{id}/{display_name}",
    tag = OAUTH1_TAG,
    operation_id = "Register Identity",
    summary = "Register an identity and optionally authorize a request token",
    description = "Creates or overwrites the identity; its id is immediately usable as an access \
                   token. With `oauth_token`, the request token is also bound \
                   to the identity exactly as if the resource owner had authorized it.",
    params(
        ("id" = String, Path, description = "Identity id."),
        ("display_name" = String, Path, description = "Display name."),
        ("oauth_token" = Option<String>, Query, description = "Request token to authorize for this identity."),
    ),
    responses(
        (status = 200, description = "Identity registered", body = RegisterResponse),
    )
)]
async fn register(
    State(state): State<OAuth1State>,
    Path((id, display_name)): Path<(String, String)>,
    Query(params): Query<RegisterQuery>,
) -> Json<RegisterResponse> {
    match params.oauth_token {
        Some(request_token) => {
            let descriptor = state
                .gate
                .complete_authorization(&request_token, &id, &display_name);
            Json(RegisterResponse {
                identity: Identity::new(id, display_name),
                oauth_token: Some(descriptor.request_token),
                oauth_verifier: Some(descriptor.verifier),
            })
        }
        None => Json(RegisterResponse {
            identity: state.gate.register_identity(&id, &display_name),
            oauth_token: None,
            oauth_verifier: None,
        }),
    }
}
