//! Runs the Healthboard HTTP server against `PostgreSQL`.
//!
//! Usage:
//!
//! ```text
//! HEALTHBOARD_DATABASE_URL=postgres://localhost/healthboard healthboard
//! ```
//!
//! See [`healthboard::config`] for the remaining environment variables. The
//! schema bootstrap is idempotent and applied on every start.

use healthboard::api::{AppState, router};
use healthboard::config::ServerConfig;
use healthboard::db::{apply_schema, build_pool};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::runtime::Builder;
use tracing_subscriber::EnvFilter;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that stop the server from starting or serving.
#[derive(Debug, Error)]
enum ServerError {
    #[error("failed to build tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
    #[error("invalid log filter: {0}")]
    LogFilter(#[from] tracing_subscriber::filter::ParseError),
    #[error("failed to connect to the database: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("failed to check out a connection: {0}")]
    Connection(#[source] diesel::r2d2::PoolError),
    #[error("failed to apply the schema: {0}")]
    Schema(#[from] diesel::result::Error),
    #[error("failed to bind listener: {0}")]
    Bind(#[source] std::io::Error),
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

fn main() -> Result<(), BoxError> {
    let config = ServerConfig::from_env()?;
    init_tracing(&config)?;
    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(ServerError::Runtime)?;
    runtime.block_on(serve(config)).map_err(Into::into)
}

fn init_tracing(config: &ServerConfig) -> Result<(), ServerError> {
    let filter = EnvFilter::try_new(&config.log_filter)?;
    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

async fn serve(config: ServerConfig) -> Result<(), ServerError> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_addr = %config.bind_addr,
        pool_size = config.pool_size,
        "healthboard starting"
    );

    let pool = build_pool(&config.database_url, config.pool_size)?;
    let bootstrap_pool = pool.clone();
    tokio::task::spawn_blocking(move || -> Result<(), ServerError> {
        let mut connection = bootstrap_pool.get().map_err(ServerError::Connection)?;
        apply_schema(&mut connection)?;
        Ok(())
    })
    .await
    .map_err(|err| ServerError::Runtime(std::io::Error::other(err)))??;
    tracing::info!("schema ready");

    let app = router(AppState::postgres(&pool));
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .map_err(ServerError::Bind)?;
    tracing::info!(bind_addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;
    tracing::info!("healthboard stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
