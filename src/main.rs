use ai_llm_service::telemetry;
use anyhow::Context;
use tracing::Level;
use tracing_subscriber::{Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present.
    // Every setting has a default, so a missing file is fine.
    dotenvy::dotenv().ok();

    // Library events go through the crate's own compact layer; everything
    // else (api, axum, reqwest) through the plain fmt layer.
    let filter = telemetry::env_filter_with_level("info", Level::INFO);
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
                    !meta.target().starts_with(telemetry::TARGET_PREFIX)
                })),
        )
        .with(telemetry::layer())
        .try_init()
        .context("setting default subscriber failed")?;

    api::start().await.context("chat API failed")?;

    Ok(())
}
