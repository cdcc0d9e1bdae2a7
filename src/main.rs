//! App Version Server - release metadata lookup for mobile clients
//!
//! Architecture:
//! - SeaORM for database access (SQLite)
//! - Axum for the HTTP API with rate limiting
//! - Clap for the administrative CLI
//! - Tokio for async runtime

mod cli;
mod config;
mod entity;
mod error;
mod prelude;
mod server;
mod state;
mod sv;

use clap::Parser;
use tracing_subscriber::{
  EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::{cli::Cli, config::Config, prelude::*};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
      "app_version=debug,tower_http=debug,sea_orm=warn".into()
    }))
    .with(tracing_subscriber::fmt::layer())
    .init();

  let cli = Cli::parse();
  let config = Config::from_env().context("Invalid configuration")?;

  info!("Starting App Version Server v{}", env!("CARGO_PKG_VERSION"));

  cli::run(cli, config).await
}
