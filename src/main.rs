#![warn(missing_docs)]

//! Screen brightness and keep-awake control for UI layers, served over a
//! method-call bridge

mod bridge;
mod channel;
mod config;
mod external;

use anyhow::{Context, Result};
use bridge::{serve_lines, BridgeChannel};
use clap::{Parser, Subcommand};
use config::Config;
use external::{
    dependency_provider::DependencyProvider, permission::PermissionNavigator,
    settings::SettingsStore, window::DisplaySurface,
};
use flexi_logger::{Duplicate, FileSpec, Logger, LoggerHandle};
use serde_json::Value;
use std::{path::PathBuf, process::ExitCode};
use tokio::io::{self, BufReader};

/// Screen brightness and keep-awake control over a method-call bridge
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Configuration file
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Work on in-memory settings and window instead of the system ones
    #[clap(long)]
    dry_run: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Invoke a single bridge method and print its response as JSON
    Call {
        /// Bridge method, e.g. getBrightness or setSystemBrightness
        method: String,

        /// JSON-encoded argument, e.g. 0.4 or true
        argument: Option<String>,
    },
    /// Serve the channel on stdin and stdout, one JSON request or response per line
    Serve,
}

fn start_logging(config: &Config) -> Result<LoggerHandle> {
    let logger = Logger::try_with_str(&config.logging.level)?;
    let handle = match &config.logging.directory {
        Some(directory) => logger
            .log_to_file(FileSpec::default().directory(directory))
            .duplicate_to_stderr(Duplicate::Warn)
            .start()?,
        None => logger.start()?,
    };
    log_panics::init();
    Ok(handle)
}

async fn run<S, W, N>(
    config: &Config,
    provider: DependencyProvider<S, W, N>,
    command: Command,
) -> Result<ExitCode>
where
    S: SettingsStore,
    W: DisplaySurface,
    N: PermissionNavigator,
{
    let channel = BridgeChannel::open(&config.channel, &provider).await?;
    let exit_code = match command {
        Command::Call { method, argument } => {
            let argument = match &argument {
                Some(a) => serde_json::from_str(a)
                    .with_context(|| format!("Argument {} is not valid JSON", a))?,
                None => Value::Null,
            };
            let response = channel.invoke(&method, argument).await?;
            println!("{}", serde_json::to_string(&response)?);
            if response.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Command::Serve => {
            log::info!("Serving {} on standard input", channel.name());
            serve_lines(&channel, BufReader::new(io::stdin()), io::stdout()).await?;
            ExitCode::SUCCESS
        }
    };
    channel.close().await;
    Ok(exit_code)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;
    let _logger = start_logging(&config)?;

    if args.dry_run {
        log::info!("Dry run, system settings are left alone");
        run(&config, DependencyProvider::make_mock(), args.command).await
    } else {
        let provider = DependencyProvider::make_system(&config);
        run(&config, provider, args.command).await
    }
}
