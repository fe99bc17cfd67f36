//! Seega - Unified CLI
//!
//! Serves a single Seega match over HTTP.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use seega::{Board, CENTRAL_STREAK_LIMIT, GameSession, PIECES_PER_PLAYER, ServerConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { config, port, host } => run_server(config, host, port).await,
        Command::Rules => {
            print_rules();
            Ok(())
        }
    }
}

/// Run the HTTP game server
#[instrument(skip_all)]
async fn run_server(
    config_path: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    let config = match config_path {
        Some(path) => ServerConfig::from_file(&path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ServerConfig::default(),
    }
    .with_overrides(host, port);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .init();

    let session = Arc::new(GameSession::new());
    let app = seega::server::router(session);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding {address}"))?;
    info!("Seega server ready at http://{}/", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolves when the process receives Ctrl-C.
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; serve until killed.
        std::future::pending::<()>().await;
    }
}

/// Print the board layout and rule summary
fn print_rules() {
    println!("Seega board (+ marks the central cell):\n");
    println!("{}\n", Board::new().display());
    println!("Placement: each player places {PIECES_PER_PLAYER} pieces, two per turn, never on the center.");
    println!("Movement: one orthogonal step onto an empty cell.");
    println!("Capture: sandwich an enemy piece between the landing cell and your own piece.");
    println!("         The central cell cannot be captured.");
    println!("Captures are mandatory; a capturing piece that can capture again keeps the turn.");
    println!("A blocked player removes one opponent piece instead of moving.");
    println!(
        "Holding the center for {CENTRAL_STREAK_LIMIT} turns forces the central piece to move next."
    );
    println!("A player with no pieces left loses.");
}
