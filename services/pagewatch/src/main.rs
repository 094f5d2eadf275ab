//! Pagewatch CLI
//!
//! Checks each web page in the config for availability and content.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use pagewatch::dashboard::DEFAULT_ADDR;
use pagewatch::RunOptions;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pagewatch")]
#[command(about = "Checks each web page in the config for availability and content")]
#[command(version)]
struct Args {
    /// File with pages to be checked
    #[arg(long, default_value = "./pages.json")]
    configfile: PathBuf,

    /// Repeat check periodically with delay of X seconds between runs.
    /// Negative value indicates no repeat.
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    delay: i64,

    /// Output log file
    #[arg(long, default_value = "./log.json")]
    logfile: PathBuf,

    /// Verbose output
    #[arg(long)]
    verbose: bool,

    /// Serve a status page
    #[arg(long)]
    html: bool,

    /// Address of the status page
    #[arg(long, default_value_t = DEFAULT_ADDR)]
    html_addr: SocketAddr,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose { Level::INFO } else { Level::WARN };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        "Parsed command line arguments: configfile={:?}, delay={}, logfile={:?}, html={}, html_addr={}",
        args.configfile,
        args.delay,
        args.logfile,
        args.html,
        args.html_addr
    );

    let options = RunOptions {
        config_path: args.configfile,
        log_path: args.logfile,
        delay: args.delay,
        verbose: args.verbose,
        html: args.html,
        html_addr: args.html_addr,
    };

    match pagewatch::run(options).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
