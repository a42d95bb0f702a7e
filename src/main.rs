use std::sync::Arc;

use recommendify_api::{
    api::{create_router, AppState},
    config::Config,
    services::{Catalog, CatalogLookup, Recommender},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;

    // Catalog is loaded once and shared read-only by every request
    let catalog = Arc::new(Catalog::from_path(&config.catalog_path)?);
    let recommender = Arc::new(Recommender::new(catalog.clone(), config.feature_weights()));
    let lookup = Arc::new(CatalogLookup::new(catalog));

    let state = AppState::new(recommender, lookup)
        .with_defaults(config.sort_method()?, config.recommendation_limit);

    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
