//! Engine: runs check passes over all configured pages

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::checker::check_page;
use crate::config::PagesConfig;
use crate::event_log::EventLog;
use crate::io::HttpClient;
use crate::requirement::RequirementRegistry;

/// Whether the engine stops after one pass or repeats forever
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Single,
    Repeating(Duration),
}

impl RunMode {
    /// Negative delays mean a single pass; otherwise repeat with `delay` seconds between passes
    pub fn from_delay(delay: i64) -> Self {
        match u64::try_from(delay) {
            Ok(secs) => RunMode::Repeating(Duration::from_secs(secs)),
            Err(_) => RunMode::Single,
        }
    }
}

/// The engine checks every page in config order and persists the log after each one
pub struct Engine {
    pages: PagesConfig,
    http: Arc<dyn HttpClient>,
    registry: RequirementRegistry,
    log: EventLog,
    mode: RunMode,
    cancel: CancellationToken,
}

impl Engine {
    pub fn new(
        pages: PagesConfig,
        http: Arc<dyn HttpClient>,
        registry: RequirementRegistry,
        log: EventLog,
        mode: RunMode,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            pages,
            http,
            registry,
            log,
            mode,
            cancel,
        }
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Check every page once, saving the log after each page
    pub async fn run_pass(&mut self) -> crate::Result<()> {
        for (name, page) in self.pages.iter() {
            if self.cancel.is_cancelled() {
                tracing::debug!("Pass cancelled before '{}'", name);
                break;
            }
            check_page(name, page, self.http.as_ref(), &self.registry, &mut self.log).await?;
            self.log.save()?;
        }
        Ok(())
    }

    /// Run passes according to the run mode. Returns after a single pass, on
    /// cancellation, or on the first fatal error.
    pub async fn run(&mut self) -> crate::Result<()> {
        loop {
            if self.cancel.is_cancelled() {
                break;
            }

            tracing::info!("Starting check of {} pages", self.pages.len());
            self.run_pass().await?;

            let delay = match self.mode {
                RunMode::Single => break,
                RunMode::Repeating(delay) => delay,
            };

            tracing::debug!("Next pass in {:?}", delay);
            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = self.cancel.cancelled() => {
                    tracing::debug!("Run loop cancelled");
                    break;
                }
            }
        }

        tracing::info!("Finished");
        Ok(())
    }
}
