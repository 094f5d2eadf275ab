//! Status page rendering the most recent events of every page

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use chrono::{DateTime, Local, Utc};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::event_log::EventLog;
use crate::PagewatchError;

/// Number of events shown per page
pub const RECENT_EVENTS: usize = 10;

/// Default bind address of the status server
pub const DEFAULT_ADDR: SocketAddr = SocketAddr::new(
    std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
    5000,
);

/// Status server state; the log is re-read from disk on every request
#[derive(Clone)]
pub struct DashboardState {
    pub log_path: Arc<PathBuf>,
}

/// Build the status server router
pub fn build_router(log_path: PathBuf) -> Router {
    let dashboard_state = DashboardState {
        log_path: Arc::new(log_path),
    };

    Router::new()
        .route("/", get(index_handler))
        .with_state(dashboard_state)
}

/// Bind the status server listener
pub async fn bind(addr: SocketAddr) -> crate::Result<TcpListener> {
    TcpListener::bind(addr).await.map_err(|e| {
        PagewatchError::Dashboard(format!("Failed to bind status server to {}: {}", addr, e))
    })
}

/// Serve the status page until `cancel` is triggered
pub async fn serve(
    listener: TcpListener,
    log_path: PathBuf,
    cancel: CancellationToken,
) -> crate::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Status server listening on http://{}", addr);
    }

    axum::serve(listener, build_router(log_path))
        .with_graceful_shutdown(async move {
            cancel.cancelled().await;
        })
        .await
        .map_err(|e| PagewatchError::Dashboard(e.to_string()))?;

    tracing::debug!("Status server stopped");
    Ok(())
}

async fn index_handler(State(dashboard): State<DashboardState>) -> Response {
    let log_path = Arc::clone(&dashboard.log_path);
    let loaded = tokio::task::spawn_blocking(move || EventLog::load(log_path.as_path()))
        .await
        .unwrap_or_else(|e| {
            Err(PagewatchError::Dashboard(format!(
                "Log reader failed: {}",
                e
            )))
        });

    match loaded {
        Ok(log) => Html(render_status(&log)).into_response(),
        Err(e) => {
            tracing::warn!("Failed to read log file {:?}: {}", dashboard.log_path, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(format!(
                    "<p>Failed to read log file: {}</p>",
                    escape_html(&e.to_string())
                )),
            )
                .into_response()
        }
    }
}

/// Render every page with its most recent events, newest first
pub fn render_status(log: &EventLog) -> String {
    log.pages()
        .map(|page| {
            let items: String = log
                .recent_events(page, RECENT_EVENTS)
                .map(|event| {
                    format!(
                        "<li>{} {}</li>",
                        format_timestamp(event.timestamp),
                        escape_html(&event.kind.to_string())
                    )
                })
                .collect();
            format!("<p>{}</p><ul>{}</ul>", escape_html(page), items)
        })
        .collect()
}

/// Local time with microseconds, e.g. `2024-05-01 13:45:12.123456`
pub fn format_timestamp(timestamp: f64) -> String {
    let secs = timestamp.floor();
    let nanos = ((timestamp - secs) * 1e9).round().min(999_999_999.0) as u32;
    match DateTime::<Utc>::from_timestamp(secs as i64, nanos) {
        Some(utc) => utc
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S%.6f")
            .to_string(),
        None => timestamp.to_string(),
    }
}

/// Escape text for use inside HTML element content
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            c => escaped.push(c),
        }
    }
    escaped
}
