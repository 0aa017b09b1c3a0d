use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use item_cli::{render, Command, CommandError, UreqTransport, View};
use item_core::config::{API_TIMEOUT_VAR, API_URL_VAR};
use item_core::{ClientConfig, ItemCollection};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Manage items in a remote collection
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the item API [default: http://localhost:8080]
    #[arg(long, env = API_URL_VAR)]
    api_url: Option<String>,

    /// Give up on a request after this many seconds (0 waits forever)
    #[arg(long, env = API_TIMEOUT_VAR)]
    timeout: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = ClientConfig::from_env().context("invalid client configuration")?;
    if let Some(url) = args.api_url {
        config.api_url = url;
    }
    if let Some(secs) = args.timeout {
        config.timeout = (secs > 0).then(|| Duration::from_secs(secs));
    }
    tracing::debug!(api_url = %config.api_url, timeout = ?config.timeout, "client configured");

    let transport = UreqTransport::new(config.timeout);
    let mut items = ItemCollection::from_config(&config);

    match item_cli::run(&args.command, &mut items, &transport) {
        Ok(View::Collection) => {
            print!("{}", render::collection(items.state()));
            Ok(ExitCode::SUCCESS)
        }
        Ok(View::Item(item)) => {
            print!("{}", render::item(&item));
            Ok(ExitCode::SUCCESS)
        }
        Err(CommandError::Collection(err)) => {
            tracing::debug!(error = %err, "command failed");
            print!("{}", render::collection(items.state()));
            Ok(ExitCode::FAILURE)
        }
        Err(err @ CommandError::Lookup { .. }) => {
            eprintln!("error: {err}");
            Ok(ExitCode::FAILURE)
        }
    }
}
