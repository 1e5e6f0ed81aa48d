//! # Phonebook - Contact directory HTTP server
//!
//! This is the main entry point that wires everything together.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  main.rs (this file) - Dependency Injection & Wiring           │
//! │    │                                                            │
//! │    ├── Creates: InMemoryContactRepository (adapter)            │
//! │    ├── Creates: ContactService (use case)                      │
//! │    ├── Creates: HTTP router (adapter)                          │
//! │    └── Runs: axum server until Ctrl+C                          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage:
//!   phonebook                          - Serve on 0.0.0.0:8000 with sample data
//!   phonebook --port 9000 --no-seed    - Serve an empty directory on port 9000
//!   phonebook --config phonebook.json  - Read settings from a JSON file

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use phonebook_adapter::{router, InMemoryContactRepository};
use phonebook_domain::ContactRepository;
use phonebook_usecase::ContactService;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, Overrides};

#[derive(Parser)]
#[command(name = "phonebook")]
#[command(about = "Phonebook - in-memory contact directory over HTTP")]
#[command(version)]
struct Cli {
    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interface to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Start with an empty directory
    #[arg(long)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(
        cli.config.as_deref(),
        Overrides {
            host: cli.host,
            port: cli.port,
            no_seed: cli.no_seed,
        },
    )?;

    // ========================================
    // Dependency Injection - Wire up the system
    // ========================================

    let repository = Arc::new(if config.seed_data {
        InMemoryContactRepository::new()
    } else {
        InMemoryContactRepository::empty()
    });
    info!("📒 Contact store ready with {} contacts", repository.count()?);

    let service = ContactService::new(repository);
    let app = router(service);

    // ========================================
    // Serve
    // ========================================

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;
    info!("🚀 Server running on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
}
