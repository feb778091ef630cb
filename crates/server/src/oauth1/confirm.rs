//! Resource owner authorization page.
//!
//! - Confirmation page (GET) - lists known identities and offers to register a new one
//! - Confirmation submission (POST) - binds the request token and redirects to the callback

use crate::entity::Identity;
use crate::oauth1::gate::RedirectDescriptor;
use crate::oauth1::{OAUTH1_TAG, state::OAuth1State};
use askama::Template;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};

#[derive(Template)]
#[template(path = "authorize.html")]
struct AuthorizeTemplate {
    request_token: String,
    callback_url: String,
    identities: Vec<Identity>,
}

#[derive(Template)]
#[template(path = "authorized.html")]
struct AuthorizedTemplate {
    identity: Identity,
    request_token: String,
    verifier: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthorizeQuery {
    pub oauth_token: Option<String>,
}

/// Form data for the confirmation submission.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AuthorizeForm {
    pub oauth_token: String,
    /// Identity id, new or existing
    pub id: String,
    pub display_name: String,
}

/// Creates the confirmation router.
pub fn router() -> OpenApiRouter<OAuth1State> {
    OpenApiRouter::new().routes(routes!(authorize_page, authorize_submit))
}

fn render<T: Template>(template: T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Failed to render authorization template: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
    }
}

/// Display the confirmation page.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/authorize",
    tag = OAUTH1_TAG,
    operation_id = "OAuth1 Authorize Page",
    summary = "Display the authorization page",
    description = "Renders the page where the resource owner picks an existing identity or registers \
                   a new one to authorize the request token with.\n\n\
                   An unknown or missing request token still renders; the callback is simply empty.",
    params(
        ("oauth_token" = Option<String>, Query, description = "Request token to authorize."),
    ),
    responses(
        (status = 200, description = "Authorization page HTML"),
    )
)]
async fn authorize_page(
    State(state): State<OAuth1State>,
    Query(params): Query<AuthorizeQuery>,
) -> Response {
    let request_token = params.oauth_token.unwrap_or_default();
    let RedirectDescriptor {
        request_token,
        callback_url,
        identities,
        ..
    } = state.gate.begin_authorization(&request_token);

    render(AuthorizeTemplate {
        request_token,
        callback_url,
        identities,
    })
}

/// Handle the confirmation submission.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    post,
    path = "/authorize",
    tag = OAUTH1_TAG,
    operation_id = "OAuth1 Authorize Submit",
    summary = "Authorize a request token",
    description = "Registers (or updates) the chosen identity and binds the request token to it. \
                   Redirects to the consumer's callback with `oauth_token` and `oauth_verifier`, or \
                   shows the verifier when there is no callback.",
    request_body(
        content = AuthorizeForm,
        content_type = "application/x-www-form-urlencoded",
        description = "Request token and identity"
    ),
    responses(
        (status = 303, description = "Redirect to the consumer callback"),
        (status = 200, description = "Authorization complete page when there is no callback"),
    )
)]
async fn authorize_submit(
    State(state): State<OAuth1State>,
    Form(form): Form<AuthorizeForm>,
) -> Response {
    let descriptor =
        state
            .gate
            .complete_authorization(&form.oauth_token, &form.id, &form.display_name);

    match descriptor.redirect_url() {
        Some(url) => Redirect::to(&url).into_response(),
        None => render(AuthorizedTemplate {
            identity: Identity::new(form.id, form.display_name),
            request_token: descriptor.request_token,
            verifier: descriptor.verifier,
        }),
    }
}
