//! Imports the upstream film list into the store.
//!
//! Usage: `DATABASE_URL=sqlite://films.db sync_films`

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use film_catalog::{sync, Config, Store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "film_catalog=info,sync_films=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let store = Store::connect(&config.database_url, config.database_max_connections)
        .await
        .with_context(|| format!("opening store at {}", config.database_url))?;

    info!(url = %config.swapi_url, "fetching films");
    let client = reqwest::Client::new();
    let films = sync::fetch_films(&client, &config.swapi_url)
        .await
        .context("fetching upstream films")?;

    let report = sync::sync_films(&store, &films)
        .await
        .context("writing films to store")?;

    info!(
        total = report.total(),
        created = report.created,
        updated = report.updated,
        "sync complete"
    );
    Ok(())
}
