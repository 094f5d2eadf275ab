//! Pagewatch - web page availability and content checker
//!
//! Fetches configured pages, checks their content against requirements,
//! records the outcomes in a JSON event log and optionally serves a status page.

pub mod checker;
pub mod config;
pub mod dashboard;
pub mod engine;
pub mod error;
pub mod event;
pub mod event_log;
pub mod io;
pub mod requirement;

pub use config::{load_config, PageConfig, PagesConfig, Requirement};
pub use error::{PagewatchError, Result};
pub use event::{Event, EventKind};
pub use event_log::EventLog;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::engine::{Engine, RunMode};
use crate::io::{HttpClient, ReqwestHttpClient};
use crate::requirement::RequirementRegistry;

/// Options for a checker run, usually taken from the command line
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub config_path: PathBuf,
    pub log_path: PathBuf,
    /// Seconds between passes; negative for a single pass
    pub delay: i64,
    pub verbose: bool,
    /// Serve the status page while running
    pub html: bool,
    pub html_addr: SocketAddr,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from("./pages.json"),
            log_path: PathBuf::from("./log.json"),
            delay: -1,
            verbose: false,
            html: false,
            html_addr: dashboard::DEFAULT_ADDR,
        }
    }
}

/// Run the checker with the production HTTP client
pub async fn run(options: RunOptions) -> Result<()> {
    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());
    run_with_client(options, http).await
}

/// Run the checker with the given HTTP client
pub async fn run_with_client(options: RunOptions, http: Arc<dyn HttpClient>) -> Result<()> {
    let pages = load_config(&options.config_path)?;
    let log = EventLog::open(&options.log_path, options.verbose)?;
    let cancel = CancellationToken::new();

    // Setup shutdown handler
    let cancel_for_signal = cancel.clone();
    let signal_task = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            cancel_for_signal.cancel();
        }
    });

    // Start status server if enabled
    let status_server = if options.html {
        match dashboard::bind(options.html_addr).await {
            Ok(listener) => Some(tokio::spawn(dashboard::serve(
                listener,
                options.log_path.clone(),
                cancel.clone(),
            ))),
            Err(e) => {
                tracing::error!("{}. Continuing without status server.", e);
                None
            }
        }
    } else {
        None
    };

    let mut engine = Engine::new(
        pages,
        http,
        RequirementRegistry::with_defaults(),
        log,
        RunMode::from_delay(options.delay),
        cancel.clone(),
    );
    let result = engine.run().await;

    cancel.cancel();
    signal_task.abort();
    if let Some(handle) = status_server {
        match handle.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!("{}", e),
            Err(e) => tracing::warn!("Status server task failed: {}", e),
        }
    }

    result
}
