//! OpenSASE Pricing - display-price resolution service

use anyhow::Result;
use opensase_pricing::{api, config::AppConfig, PriceResolver};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())).with(tracing_subscriber::fmt::layer()).init();

    let config = AppConfig::from_env()?;
    tracing::info!(zero_base = ?config.resolver.zero_base, floor_at_zero = config.resolver.floor_at_zero, currency = %config.resolver.currency_label, "pricing policy loaded");

    let state = api::AppState::new(PriceResolver::new(config.resolver));
    let app = api::router(state).layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!("OpenSASE Pricing listening on 0.0.0.0:{}", config.port);
    axum::serve(listener, app).await?;
    Ok(())
}
