//! Application entry point.
//!
//! Initializes logging, loads configuration from the environment, and runs
//! the HTTP server until the process is terminated.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use conecta_server::config::Config;
use conecta_server::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Console output with compact formatting; RUST_LOG overrides the level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact(),
        )
        .init();

    tracing::info!(
        "🏁 Starting {} v{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    // Configuration is a startup precondition: a missing JWT secret or
    // database URL refuses to boot instead of failing per-request.
    let config = Config::from_env()?;

    server::start(config).await
}
