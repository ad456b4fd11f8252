//! workfoliod — the WorkFolio daemon.
//!
//! Single binary that assembles the employee store, the service layer
//! and the web front end.
//!
//! # Usage
//!
//! ```text
//! workfoliod serve --config /etc/workfolio.toml --port 8080 --data-dir /var/lib/workfolio
//! ```

mod config;

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::WorkfolioConfig;

#[derive(Parser)]
#[command(name = "workfoliod", about = "WorkFolio employee records daemon")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the web application.
    Serve {
        /// Path to a workfolio.toml file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to listen on (overrides the config file).
        #[arg(long)]
        port: Option<u16>,

        /// Data directory for persistent state (overrides the config file).
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,workfoliod=debug,workfolio=debug".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            port,
            data_dir,
        } => {
            let mut config = WorkfolioConfig::load(config.as_deref())?;
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(data_dir) = data_dir {
                config.storage.data_dir = data_dir;
            }
            serve(config).await
        }
    }
}

async fn serve(config: WorkfolioConfig) -> anyhow::Result<()> {
    info!("WorkFolio daemon starting");

    std::fs::create_dir_all(&config.storage.data_dir)?;
    let db_path = config.db_path();

    let store = workfolio_state::EmployeeStore::open(&db_path)?;
    info!(path = ?db_path, employees = store.count()?, "employee store opened");

    let service = workfolio_service::EmployeeService::new(store);
    let router = workfolio_web::build_router(service, config.web_settings());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!(%addr, page_size = config.pagination.page_size, "HTTP server starting");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for shutdown signal");
            }
            info!("shutdown signal received");
        })
        .await?;

    info!("WorkFolio daemon stopped");
    Ok(())
}
