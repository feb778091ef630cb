//! HTTP surface of the fixture.
//!
//! This module is organized into submodules:
//! - `osm` - OpenStreetMap API resources (/api/0.6/*)
//! - `health` - Health check endpoint (/healthz)
//! - `openapi` - OpenAPI/Utoipa configuration
//!
//! The OAuth 1.0a endpoints live in [`crate::oauth1`] and are mounted here.

pub mod health;
pub mod openapi;
pub mod osm;

pub use health::MISC_TAG;
pub use osm::{OSM_TAG, OsmApiState};

use crate::AppResources;
use crate::oauth1;
use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_redoc::{Redoc, Servable};

/// Build the complete router: handshake, registration helper, resources,
/// health check and API docs.
pub fn build_router(resources: &AppResources) -> Router {
    let osm_state = OsmApiState {
        correlator: resources.oauth.correlator.clone(),
        facade: resources.osm.clone(),
    };

    let (router, api) = OpenApiRouter::with_openapi(openapi::ApiDoc::openapi())
        .nest("/oauth", oauth1::router(resources.oauth.clone()))
        .merge(oauth1::register::router(resources.oauth.clone()))
        .nest("/api/0.6", osm::router(osm_state))
        .routes(routes!(health::health))
        // Editors call the fixture from the browser
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .split_for_parts();

    router.merge(Redoc::with_url("/api-docs", api))
}

/// Starts the web server with all configured routes.
#[tracing::instrument(skip(resources))]
pub async fn start_webserver(resources: AppResources) -> color_eyre::Result<()> {
    let addr = resources.config.socket_addr()?;
    let router = build_router(&resources);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Server running");
    axum::serve(listener, router)
        .await
        .map_err(|e| color_eyre::Report::msg(format!("Failed to start server: {e}")))?;

    Ok(())
}
