//! BDD test world for pagewatch

use std::collections::HashMap;
use std::sync::Arc;

use cucumber::World;
use pagewatch::io::{HttpClient, HttpResponse};
use pagewatch::{EventLog, PageConfig, PagewatchError};
use tokio::sync::RwLock;

/// What a scripted URL answers with
#[derive(Debug, Clone)]
pub enum Scripted {
    Body(String),
    ConnectionError(String),
}

/// An HTTP client answering from a script and recording every request
#[derive(Debug, Default)]
pub struct ScriptedHttpClient {
    pub responses: RwLock<HashMap<String, Scripted>>,
    pub requests: RwLock<Vec<String>>,
}

impl ScriptedHttpClient {
    pub async fn script(&self, url: &str, answer: Scripted) {
        self.responses.write().await.insert(url.to_string(), answer);
    }
}

#[async_trait::async_trait]
impl HttpClient for ScriptedHttpClient {
    async fn get(&self, url: &str) -> pagewatch::Result<HttpResponse> {
        self.requests.write().await.push(url.to_string());
        match self.responses.read().await.get(url) {
            Some(Scripted::Body(body)) => Ok(HttpResponse {
                status: 200,
                body: body.clone(),
            }),
            Some(Scripted::ConnectionError(msg)) => Err(PagewatchError::Http(msg.clone())),
            None => Err(PagewatchError::Http(format!("no script for {}", url))),
        }
    }
}

#[derive(Debug, Default, World)]
pub struct PagewatchWorld {
    pub dir: Option<tempfile::TempDir>,

    // Page checking
    pub pages: Vec<(String, PageConfig)>,
    pub http: Arc<ScriptedHttpClient>,
    pub run_result: Option<pagewatch::Result<()>>,

    // Event log
    pub log: Option<EventLog>,
    pub saved_files: Vec<Vec<u8>>,
    pub recorded_after: Option<f64>,

    // Requirement checks
    pub page_text: Option<String>,
    pub check_result: Option<pagewatch::Result<bool>>,

    // Status page
    pub status_html: Option<String>,
}

impl PagewatchWorld {
    /// Path of the log file inside the scenario's temporary directory
    pub fn log_path(&mut self) -> std::path::PathBuf {
        self.dir
            .get_or_insert_with(|| tempfile::tempdir().expect("failed to create temp dir"))
            .path()
            .join("log.json")
    }

    pub fn log_mut(&mut self) -> &mut EventLog {
        self.log.as_mut().expect("event log not opened")
    }
}
