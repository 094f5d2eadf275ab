//! Append-only per-page event log persisted as a single JSON document

use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

use crate::event::{Event, EventKind};
use crate::Result;

/// Events recorded for each page, oldest first.
///
/// Pages keep the order of the log file, new pages are appended.
#[derive(Debug, Clone)]
pub struct EventLog {
    path: PathBuf,
    verbose: bool,
    pages: Vec<(String, Vec<Event>)>,
}

/// Serializes pages as a JSON object in their stored order
struct PagesDocument<'a>(&'a [(String, Vec<Event>)]);

impl Serialize for PagesDocument<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(page, events)| (page, events)))
    }
}

fn parse_pages(content: &str) -> Result<Vec<(String, Vec<Event>)>> {
    let document: serde_json::Map<String, serde_json::Value> = serde_json::from_str(content)?;
    document
        .into_iter()
        .map(|(page, events)| Ok((page, serde_json::from_value(events)?)))
        .collect()
}

impl EventLog {
    /// Open the log at `path`, creating an empty log file if none exists
    pub fn open(path: impl Into<PathBuf>, verbose: bool) -> Result<Self> {
        let path = path.into();
        if path.exists() {
            if verbose {
                tracing::info!("Checking log file {:?}", path);
            }
            let mut log = Self::load(&path)?;
            log.verbose = verbose;
            Ok(log)
        } else {
            if verbose {
                tracing::info!("Log file {:?} does not exist, creating", path);
            }
            let log = Self {
                path,
                verbose,
                pages: Vec::new(),
            };
            log.save()?;
            Ok(log)
        }
    }

    /// Read the log at `path` without creating it; a missing file reads as empty
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let pages = match std::fs::read_to_string(path) {
            Ok(content) => parse_pages(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path: path.to_path_buf(),
            verbose: false,
            pages,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stamp `kind` with the current time and append it to `page`
    pub fn add_event(&mut self, page: &str, kind: EventKind) {
        let event = Event::now(kind);
        if self.verbose {
            tracing::info!(
                "[{}] {}",
                page,
                serde_json::to_string(&event).unwrap_or_default()
            );
        } else {
            tracing::debug!("[{}] {}", page, event.kind.type_name());
        }
        match self.pages.iter_mut().find(|(name, _)| name == page) {
            Some((_, events)) => events.push(event),
            None => self.pages.push((page.to_string(), vec![event])),
        }
    }

    /// Names of all pages with recorded events
    pub fn pages(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().map(|(name, _)| name.as_str())
    }

    /// All events for `page`, oldest first; empty if the page was never seen
    pub fn events(&self, page: &str) -> &[Event] {
        self.pages
            .iter()
            .find(|(name, _)| name == page)
            .map(|(_, events)| events.as_slice())
            .unwrap_or(&[])
    }

    /// The newest `count` events for `page`, newest first
    pub fn recent_events(&self, page: &str, count: usize) -> impl Iterator<Item = &Event> {
        self.events(page).iter().rev().take(count)
    }

    /// Rewrite the whole log file.
    ///
    /// The document is written to a sibling temporary file and renamed over
    /// the log, so readers see either the previous or the new contents.
    pub fn save(&self) -> Result<()> {
        let content = serde_json::to_vec(&PagesDocument(&self.pages))?;
        let tmp_path = temp_path(&self.path);
        std::fs::write(&tmp_path, content)?;
        std::fs::rename(&tmp_path, &self.path)?;
        tracing::debug!("Saved log file {:?}", self.path);
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
