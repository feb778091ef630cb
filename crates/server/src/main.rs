use osm_oauth_fixture::AppResources;
use osm_oauth_fixture::api::start_webserver;
use osm_oauth_fixture::config::load_config_or_panic;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn initialize_tracing() {
    let default_directives = "osm_oauth_fixture=info,tower_http=info";
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    let registry = tracing_subscriber::registry().with(env_filter);
    let layer = fmt::layer().with_target(true).with_level(true);

    registry.with(layer).init();
}

#[tokio::main]
async fn main() -> color_eyre::eyre::Result<()> {
    color_eyre::install()?;

    // A missing .env is fine
    dotenvy::dotenv().ok();

    initialize_tracing();

    let config = load_config_or_panic();
    tracing::info!(
        listen_addr = %config.listen_addr,
        seed_identities = config.seed_identities.len(),
        account_created = %config.account.account_created,
        "fixture configuration"
    );

    let resources = AppResources::in_memory(config);
    start_webserver(resources).await?;
    Ok(())
}
