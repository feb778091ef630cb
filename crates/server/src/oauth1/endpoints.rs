//! OAuth 1.0a token endpoints.
//!
//! - Temporary credential (request token) endpoint
//! - Token (access token) endpoint
//!
//! The authorization endpoint lives in [`super::confirm`].

use crate::error::CredentialError;
use crate::oauth1::header::{credential_from_headers, parse_authorization_header};
use crate::oauth1::{OAUTH1_TAG, state::OAuth1State};
use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Creates the OAuth 1.0a router, to be nested under `/oauth`.
pub fn router(state: OAuth1State) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(request_token))
        .routes(routes!(access_token))
        .merge(super::confirm::router())
        .with_state(state)
}

// =============================================================================
// Request/Response Types
// =============================================================================

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RequestTokenForm {
    /// Where to send the resource owner after authorization, or `oob`
    pub oauth_callback: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AccessTokenForm {
    /// Authorized request token, when not sent in the Authorization header
    pub oauth_token: Option<String>,
    pub oauth_verifier: Option<String>,
}

/// Form-encoded success body.
fn form_response(body: String) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, FORM_CONTENT_TYPE)],
        body,
    )
        .into_response()
}

/// `401` with an `oauth_problem` body.
pub(crate) fn problem_response(error: &CredentialError) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::CONTENT_TYPE, FORM_CONTENT_TYPE)],
        format!(
            "oauth_problem={}&oauth_problem_advice={}",
            error.oauth_problem(),
            urlencoding::encode(&error.to_string())
        ),
    )
        .into_response()
}

// =============================================================================
// Endpoints
// =============================================================================

/// Temporary credential endpoint.
#[tracing::instrument(skip(state, headers, form))]
#[utoipa::path(
    post,
    path = "/request_token",
    tag = OAUTH1_TAG,
    operation_id = "OAuth1 Request Token",
    summary = "Obtain a request token",
    description = "Starts the three-legged handshake. The callback is taken from the `oauth_callback` \
                   parameter of the Authorization header, or from the form body.\n\n\
                   Signatures are not verified.",
    request_body(
        content = RequestTokenForm,
        content_type = "application/x-www-form-urlencoded",
        description = "Optional callback URL"
    ),
    responses(
        (status = 200, description = "Request token issued", body = str, content_type = "application/x-www-form-urlencoded",
         example = "oauth_token=abc&oauth_token_secret=fixture-secret&oauth_callback_confirmed=true"),
    )
)]
pub async fn request_token(
    State(state): State<OAuth1State>,
    headers: HeaderMap,
    form: Result<Form<RequestTokenForm>, FormRejection>,
) -> Response {
    let from_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| parse_authorization_header(v).ok())
        .and_then(|h| h.get("oauth_callback").map(str::to_string));
    let from_body = form.ok().and_then(|Form(f)| f.oauth_callback);
    let callback_url = from_header.or(from_body).unwrap_or_default();

    let pair = state.issuer.issue_request_token(&callback_url);
    form_response(pair.to_form_body())
}

/// Token endpoint.
#[tracing::instrument(skip(state, headers, form))]
#[utoipa::path(
    post,
    path = "/access_token",
    tag = OAUTH1_TAG,
    operation_id = "OAuth1 Access Token",
    summary = "Exchange an authorized request token for an access token",
    description = "The request token is read from the `oauth_token` parameter of the Authorization \
                   header, falling back to the form body. An unauthorized request token yields an \
                   empty access token rather than an error.",
    request_body(
        content = AccessTokenForm,
        content_type = "application/x-www-form-urlencoded",
        description = "Request token when no Authorization header is sent"
    ),
    responses(
        (status = 200, description = "Access token issued", body = str, content_type = "application/x-www-form-urlencoded",
         example = "oauth_token=1&oauth_token_secret=fixture-secret"),
        (status = 401, description = "No request token could be extracted", body = str, content_type = "application/x-www-form-urlencoded"),
        (status = 500, description = "Handshake store is inconsistent"),
    )
)]
pub async fn access_token(
    State(state): State<OAuth1State>,
    headers: HeaderMap,
    form: Result<Form<AccessTokenForm>, FormRejection>,
) -> Response {
    let body_token = form.ok().and_then(|Form(f)| f.oauth_token);
    let request_token = match (credential_from_headers(&headers), body_token) {
        (Ok(token), _) => token,
        (Err(_), Some(token)) => token,
        (Err(e), None) => {
            tracing::info!(error = %e, "Access token request without request token");
            return problem_response(&e);
        }
    };

    match state.correlator.exchange(&request_token) {
        Ok(grant) => form_response(grant.to_form_body()),
        Err(e) => {
            tracing::error!("Failed to exchange request token: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
    }
}
