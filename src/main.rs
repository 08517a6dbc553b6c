use catalog_api::{config::Config, routes::create_router, state::AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    // Initialize application state and load the demo catalog
    let state = AppState::from_config(&config);
    state.products.seed_demo().await?;
    tracing::info!(
        products = state.products.count().await,
        user_service = %config.user_service_url,
        order_service = %config.order_service_url,
        "Catalog seeded"
    );

    // Create the router with all routes
    let app = create_router(state);

    // Start the server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "catalog-api listening");
    axum::serve(listener, app).await?;

    Ok(())
}
