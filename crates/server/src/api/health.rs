//! Health check endpoint.

/// Tag for OpenAPI documentation.
pub const MISC_TAG: &str = "Miscellaneous";

/// Health check endpoint.
#[tracing::instrument()]
#[utoipa::path(
    method(get, head),
    path = "/healthz",
    tag = MISC_TAG,
    operation_id = "Health Check",
    summary = "Fixture health check",
    description = "Returns a simple health status indicating the fixture is accepting requests.\n\n\
                   Test harnesses can poll it before starting a handshake.\n\n\
                   Supports both GET and HEAD methods.",
    responses(
        (status = 200, description = "Fixture is healthy", body = str, content_type = "text/plain", example = "ok")
    )
)]
pub async fn health() -> &'static str {
    "ok"
}
