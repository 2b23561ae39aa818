use std::sync::Arc;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use secrecy::ExposeSecret;
use tokio::signal;
use tracing::{info, warn};

use blog_api::api::create_router;
use blog_api::app::{AppConfig, AppState};
use blog_api::infra::{
    Argon2PasswordHasher, JwtTokenService, PostgresClient, PostgresConfig, init_metrics_handle,
    init_tracing,
};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; the variables may come from the environment
    dotenv().ok();

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    init_tracing(config.log_format).context("Failed to initialize tracing")?;

    let metrics_handle = init_metrics_handle();
    if metrics_handle.is_none() {
        warn!("Prometheus recorder not installed; /metrics will return 404");
    }

    let db_config = PostgresConfig {
        max_connections: config.db_max_connections,
        ..PostgresConfig::default()
    };
    let postgres = PostgresClient::new(config.database_url.expose_secret(), db_config)
        .await
        .context("Failed to connect to PostgreSQL")?;
    postgres
        .run_migrations()
        .await
        .context("Failed to run migrations")?;

    let state = AppState::new(
        Arc::new(postgres),
        Arc::new(Argon2PasswordHasher::new()),
        Arc::new(JwtTokenService::new(
            &config.token_secret,
            config.token_ttl_secs,
        )),
    )
    .with_metrics(metrics_handle);

    let router = create_router(Arc::new(state));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "Server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
