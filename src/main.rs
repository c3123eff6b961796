use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use panel_survey::{
    AppConfig, AppState, BcryptSecretVerifier, CredentialVerifier, InitiatorCredential,
    InitiatorSecret, JsonDocumentStore, SurveyService, build_router,
    cli::{Cli, Command},
};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Command::HashSecret { secret, cost }) = &cli.command {
        let hash = bcrypt::hash(secret, *cost).context("failed to hash secret")?;
        println!("{hash}");
        return Ok(());
    }

    init_tracing();

    let config = cli.apply(AppConfig::from_env().context("failed to load application configuration")?);

    let verifier = initiator_verifier(&config.initiator);
    info!(scheme = verifier.scheme(), "initiator verification configured");

    let service = SurveyService::new(JsonDocumentStore::new(&config.data_file), verifier);
    service
        .initialize()
        .await
        .with_context(|| format!("failed to initialize {}", config.data_file.display()))?;

    let app = build_router(AppState::new(
        service,
        config.asset_dir.clone(),
        config.entry_page_path(),
    ));

    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(address = %addr, "survey server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

fn initiator_verifier(credential: &InitiatorCredential) -> Arc<dyn CredentialVerifier> {
    match credential {
        InitiatorCredential::BcryptHash(hash) => Arc::new(BcryptSecretVerifier::new(hash.clone())),
        InitiatorCredential::Secret(configured) => {
            let secret = InitiatorSecret::resolve(configured.as_deref());
            if secret.was_generated() {
                // Only place the generated secret ever leaves the process.
                warn!(
                    secret = secret.expose(),
                    "INITIATOR_SECRET not set; generated one for this run"
                );
            }
            Arc::new(secret.into_verifier())
        }
    }
}

/// Used when `RUST_LOG` is unset or unparseable.
const DEFAULT_LOG_FILTER: &str = "panel_survey=info,tower_http=info";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

/// Resolves on Ctrl-C, or SIGTERM on unix. In-flight requests drain after it.
async fn shutdown_signal() {
    let received = wait_for_stop().await;
    info!(signal = received, "shutting down survey server");
}

#[cfg(unix)]
async fn wait_for_stop() -> &'static str {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(stream) => stream,
        Err(err) => {
            error!(error = %err, "SIGTERM handler unavailable; only Ctrl-C stops the server");
            return wait_for_ctrl_c().await;
        }
    };

    tokio::select! {
        received = wait_for_ctrl_c() => received,
        _ = sigterm.recv() => "SIGTERM",
    }
}

#[cfg(not(unix))]
async fn wait_for_stop() -> &'static str {
    wait_for_ctrl_c().await
}

async fn wait_for_ctrl_c() -> &'static str {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "Ctrl-C handler unavailable");
        std::future::pending::<()>().await;
    }
    "Ctrl-C"
}
