mod cli;
mod telemetry;

use crate::cli::{GeneratorArg, CLI};
use clap::Parser;
use jiff::SignedDuration;
use pinhole_core::SystemClock;
use pinhole_gateway::{App, AppState};
use pinhole_generator::{Generator, RandomGenerator, SeqGenerator};
use pinhole_registry::{RegistryService, RegistrySettings};
use pinhole_storage::{InMemoryClickLedger, InMemoryLinkRepository};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();

    let _guard = telemetry::init(config.log_format, config.access_log.as_deref())?;

    info!(
        listen_addr = %config.listen_addr,
        generator = %config.generator,
        default_validity_minutes = config.default_validity_minutes,
        "starting gateway server"
    );

    match config.generator {
        GeneratorArg::Random => {
            serve(&config, RandomGenerator::with_length(config.code_length)?).await
        }
        GeneratorArg::Seq => {
            serve(&config, SeqGenerator::with_prefix(config.generator_prefix.clone())?).await
        }
    }
}

async fn serve<G: Generator>(config: &CLI, generator: G) -> anyhow::Result<()> {
    let repository = Arc::new(InMemoryLinkRepository::new());
    let analytics = Arc::new(InMemoryClickLedger::new());

    let settings = RegistrySettings::builder()
        .default_validity(SignedDuration::from_secs(
            config.default_validity_minutes.saturating_mul(60),
        ))
        .max_generation_attempts(config.max_generation_attempts)
        .build();
    let registry = RegistryService::new(repository, analytics.clone(), generator)
        .with_settings(settings);

    let state = AppState::new(Arc::new(registry), analytics, Arc::new(SystemClock))
        .with_base_url(config.public_base_url.clone());

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(
        listener,
        App::router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
