use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::{TokioIo, TokioTimer};
use tokio::net::TcpListener;
use tokio_rusqlite::Connection;

// Error tracing
use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

mod database;
mod handlers;
mod state;

use handlers::http::error_handlers::ErrorHandlerTable;
use handlers::http::routes::build_api_router;
use shared::config::load_config;
use shared::types::AppConfig;
use state::AppState;

#[derive(Parser, Debug)]
#[command(name = "server", about = "Product REST API server")]
struct Args {
    /// Path to a TOML config file. Built-in defaults are used when omitted.
    #[arg(long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path).context("Failed to load configuration")?,
        None => {
            info!("No config file given, using built-in defaults");
            AppConfig::default()
        }
    };

    let addr: SocketAddr = config
        .server
        .addr()
        .parse()
        .context("Invalid server bind address")?;

    let db = Connection::open(&config.database.path)
        .await
        .context("Failed to open product database")?;
    database::create_tables(&db)
        .await
        .context("Failed to initialize database schema")?;

    let state = AppState::new(db, config);

    // The error-handler table is the single place failures get shaped into
    // JSON responses; the router receives it here and owns it from then on.
    let router = Arc::new(build_api_router(ErrorHandlerTable::new()));

    let listener = TcpListener::bind(addr)
        .await
        .context(format!("Failed to bind to {}", addr))?;
    info!(
        "Listening on http://{} (max {} connections)",
        addr, state.config.server.max_connections
    );

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received, stopping accept loop");
                break;
            }

            accepted = listener.accept() => {
                let (stream, peer) = accepted.context("Failed to accept connection")?;
                let io = TokioIo::new(stream);
                let router = router.clone();
                let state = state.clone();

                tokio::task::spawn(async move {
                    // Handle the connection using HTTP1 and feed every request
                    // on it through the router; `route` is infallible, so the
                    // service error type collapses to `Infallible`.
                    let service = service_fn(move |req| {
                        let router = router.clone();
                        let state = state.clone();
                        async move { Ok::<_, Infallible>(router.route(req, state).await) }
                    });

                    if let Err(err) = http1::Builder::new()
                        .timer(TokioTimer::new())
                        .serve_connection(io, service)
                        .await
                    {
                        warn!("Error serving connection from {}: {:?}", peer, err);
                    }
                });
            }
        }
    }

    info!("Server stopped");
    Ok(())
}
