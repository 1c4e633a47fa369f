//! # Key Vault Demo Web API
//!
//! Serves `/health` and `/secret` (masked) backed by Azure Key Vault.
//!
//! ## Configuration
//!
//! - `KEYVAULT_URI` - vault URL or bare vault name (read per request)
//! - `SECRET_NAME` - secret to fetch (read per request)
//! - `PORT` - listen port (default 8080, `--port` overrides)
//!
//! An optional `.env` file is loaded before anything else.

use anyhow::{Context, Result};
use clap::Parser;
use keyvault_demo::observability::logging::init_tracing;
use keyvault_demo::runtime::{run, HostKind};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Debug, Parser)]
#[command(name = "keyvault-demo-api", version, about = "Key Vault demo web API")]
struct Args {
    /// Port to listen on (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Settings file loaded into the environment at start-up
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load before tracing so RUST_LOG from the file applies
    let dotenv = dotenvy::from_path(&args.env_file);
    init_tracing();
    match dotenv {
        Ok(()) => info!("Loaded settings from {}", args.env_file.display()),
        Err(e) if e.not_found() => debug!("No {} file, using environment", args.env_file.display()),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to load {}", args.env_file.display()))
        }
    }

    run(HostKind::WebApi, args.port).await
}
