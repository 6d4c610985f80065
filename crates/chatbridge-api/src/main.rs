//! chatbridge entry point.
//!
//! Binary name: `chatbridge`
//!
//! Loads `.env`, parses CLI arguments, sets up tracing, then either applies
//! migrations or starts the REST API server.

mod cli;
mod http;
mod state;

use clap::Parser;

use chatbridge_infra::config::BridgeConfig;
use chatbridge_infra::sqlite::pool::DatabasePool;
use chatbridge_observe::tracing_setup::{init_tracing, shutdown_tracing};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is normal in deployment.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "info,chatbridge=debug",
        _ => "trace",
    };
    init_tracing(cli.otel, filter).map_err(|e| anyhow::anyhow!(e))?;

    let result = match cli.command {
        Commands::Serve(args) => serve(args.into_config(cli.otel)).await,
        Commands::Migrate { database_url } => migrate(&database_url).await,
    };

    shutdown_tracing();
    result
}

async fn serve(config: BridgeConfig) -> anyhow::Result<()> {
    let state = AppState::init(&config).await?;

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "chatbridge listening");

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn migrate(database_url: &str) -> anyhow::Result<()> {
    // Opening the pool applies any pending migrations.
    let pool = DatabasePool::new(database_url).await?;
    pool.writer.close().await;
    pool.reader.close().await;
    tracing::info!(database_url = %database_url, "Migrations applied");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
