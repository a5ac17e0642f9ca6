mod config;
mod error;
mod routes;
mod state;

use eyre::WrapErr;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Song search server starting...");

    let config = config::Config::from_env().wrap_err("Failed to load song search config")?;

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.fetch_timeout_secs))
        .build()
        .wrap_err("Failed to build http client")?;

    let app_state = state::AppState::new(config.clone(), http_client);

    // Warm the store cache so the first query doesn't pay for the download.
    // The server still starts when the sheet is unreachable; queries surface
    // the load error until a refresh succeeds.
    match app_state.store().await {
        Ok(store) => tracing::info!("Loaded {} performance records", store.len()),
        Err(e) => tracing::warn!("Initial sheet load failed (server will still start): {e:?}"),
    }

    let app = routes::create_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err("Failed to bind to address")?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate()).expect("install SIGTERM handler");
    tokio::select! {
        _ = sigterm.recv() => {},
        _ = tokio::signal::ctrl_c() => {},
    }
}
