//! OpenStreetMap API 0.6 endpoints.
//!
//! - `/user/details` - Profile of the authenticated user
//! - `/users` - Public profiles for a list of ids
//! - `/changesets` - Changesets of a user, by display name

use crate::oauth1::{AccessCorrelator, credential_from_headers};
use crate::osm::xml::{XML_CONTENT_TYPE, render_changesets, render_user_details, render_users};
use crate::osm::ResourceFacade;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use utoipa::IntoParams;
use utoipa_axum::{router::OpenApiRouter, routes};

/// Tag for OpenAPI documentation.
pub const OSM_TAG: &str = "OpenStreetMap API";

/// Shared state for the resource endpoints.
#[derive(Clone)]
pub struct OsmApiState {
    pub correlator: AccessCorrelator,
    pub facade: ResourceFacade,
}

#[derive(Deserialize, IntoParams, Debug)]
pub struct UsersParams {
    /// Comma-separated user ids, e.g. `1,2,1`
    pub users: String,
}

#[derive(Deserialize, IntoParams, Debug)]
pub struct ChangesetsParams {
    /// Display name of the changeset author
    pub display_name: Option<String>,
}

/// Creates the resource router, to be nested under `/api/0.6`.
pub fn router(state: OsmApiState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(user_details))
        .routes(routes!(users))
        .routes(routes!(changesets))
        .with_state(state)
}

fn xml_response(rendered: askama::Result<String>) -> Response {
    match rendered {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, XML_CONTENT_TYPE)],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to render OSM document: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
    }
}

/// Split a `users` parameter into ids, dropping empty entries.
pub fn parse_user_ids(users: &str) -> Vec<&str> {
    users
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .collect()
}

#[tracing::instrument(skip(state, headers))]
#[utoipa::path(
    get,
    path = "/user/details",
    tag = OSM_TAG,
    operation_id = "User Details",
    summary = "Details of the authenticated user",
    description = "Resolves the `oauth_token` of the OAuth Authorization header to an identity. \
                   A missing, malformed or unknown credential yields a placeholder user with an \
                   empty id and display name.",
    security(
        ("oauth1" = [])
    ),
    responses(
        (status = 200, description = "OSM user document", body = str, content_type = "text/xml"),
    )
)]
async fn user_details(State(state): State<OsmApiState>, headers: HeaderMap) -> Response {
    let identity = match credential_from_headers(&headers) {
        Ok(credential) => state.correlator.resolve(&credential),
        Err(e) => {
            tracing::debug!(error = %e, "No usable credential on user details request");
            None
        }
    };

    let profile = state.facade.get_self(identity.as_ref());
    xml_response(render_user_details(&profile))
}

#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/users",
    params(UsersParams),
    tag = OSM_TAG,
    operation_id = "Users",
    summary = "Public profiles of several users",
    description = "One `<user>` element per requested id, in request order. Unregistered ids yield a \
                   placeholder user with an empty display name.",
    responses(
        (status = 200, description = "OSM users document", body = str, content_type = "text/xml"),
        (status = 400, description = "Missing `users` parameter"),
    )
)]
async fn users(State(state): State<OsmApiState>, Query(params): Query<UsersParams>) -> Response {
    let ids = parse_user_ids(&params.users);
    let profiles = state.facade.get_users_by_ids(&ids);
    xml_response(render_users(&profiles))
}

#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/changesets",
    params(ChangesetsParams),
    tag = OSM_TAG,
    operation_id = "Changesets",
    summary = "Changesets of a user",
    description = "Always answers the same synthetic changeset, attributed to the user with the given \
                   display name when one is registered.",
    responses(
        (status = 200, description = "OSM changesets document", body = str, content_type = "text/xml"),
    )
)]
async fn changesets(
    State(state): State<OsmApiState>,
    Query(params): Query<ChangesetsParams>,
) -> Response {
    let display_name = params.display_name.unwrap_or_default();
    let changeset = state
        .facade
        .get_changeset_by_user_display_name(&display_name);
    xml_response(render_changesets(std::slice::from_ref(&changeset)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_user_ids_keeps_order_and_duplicates() {
        assert_eq!(parse_user_ids("1,2,1"), vec!["1", "2", "1"]);
        assert_eq!(parse_user_ids(" 1 , ,2"), vec!["1", "2"]);
        assert!(parse_user_ids("").is_empty());
    }
}
