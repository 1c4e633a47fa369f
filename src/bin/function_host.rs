//! # Key Vault Demo Function Host
//!
//! Azure Functions custom handler. The Functions host starts this binary,
//! passes the port in `FUNCTIONS_CUSTOMHANDLER_PORT` and forwards HTTP
//! requests to it unchanged (see `deploy/function/host.json`).
//!
//! App settings `KEYVAULT_URI` and `SECRET_NAME` are read per request.

use anyhow::Result;
use clap::Parser;
use keyvault_demo::observability::logging::init_tracing;
use keyvault_demo::runtime::{run, HostKind};

#[derive(Debug, Parser)]
#[command(
    name = "keyvault-demo-function",
    version,
    about = "Key Vault demo Azure Functions custom handler"
)]
struct Args {
    /// Port to listen on (overrides FUNCTIONS_CUSTOMHANDLER_PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();
    run(HostKind::FunctionHost, args.port).await
}
