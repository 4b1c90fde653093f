// ABOUTME: Entry point for hearth-setup, the one-time provisioning CLI
// ABOUTME: Parses arguments, initializes logging, and runs the setup sequence

use clap::Parser;
use colored::*;
use std::path::PathBuf;
use std::process;

mod setup;

#[derive(Parser)]
#[command(name = "hearth-setup")]
#[command(about = "Interactive OAuth and device registration setup for Hearth")]
#[command(version)]
struct Cli {
    /// Path to the client_secret.json file downloaded from the cloud console
    client_secret: PathBuf,

    /// Data directory for credentials.json and device_config.json
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Use the copy-paste authorization flow (for headless machines)
    #[arg(long)]
    manual: bool,

    /// Port for the local OAuth callback listener
    #[arg(long)]
    port: Option<u16>,

    /// Write credentials only; skip device registration
    #[arg(long)]
    skip_registration: bool,
}

#[tokio::main]
async fn main() {
    // Keep prompts readable: libraries log at warn unless RUST_LOG says otherwise
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let options = setup::SetupOptions {
        client_secret: cli.client_secret,
        data_dir: cli.data_dir,
        manual: cli.manual,
        port: cli.port,
        skip_registration: cli.skip_registration,
    };

    if let Err(e) = setup::run(options).await {
        eprintln!("{} {}", "✗".red().bold(), e);
        process::exit(1);
    }
}
