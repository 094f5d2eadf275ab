//! Events recorded about each page check

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::config::Requirement;

/// What happened during a check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    ResponseFailed { error: String },
    ResponseReceived { duration: f64 },
    RequirementPassed { requirement: Requirement },
    RequirementFailed { requirement: Requirement },
}

impl EventKind {
    /// The `type` tag used in the log file
    pub fn type_name(&self) -> &'static str {
        match self {
            EventKind::ResponseFailed { .. } => "response_failed",
            EventKind::ResponseReceived { .. } => "response_received",
            EventKind::RequirementPassed { .. } => "requirement_passed",
            EventKind::RequirementFailed { .. } => "requirement_failed",
        }
    }
}

/// Human-readable description, as shown on the status page
impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::ResponseFailed { .. } => write!(f, "Response failed"),
            EventKind::ResponseReceived { duration } => {
                write!(f, "Response received in {:.2} s", duration)
            }
            EventKind::RequirementPassed { requirement } => {
                write!(f, "Requirement {} passed", requirement)
            }
            EventKind::RequirementFailed { requirement } => {
                write!(f, "Requirement {} failed", requirement)
            }
        }
    }
}

/// A timestamped event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(flatten)]
    pub kind: EventKind,
    /// Seconds since the Unix epoch
    pub timestamp: f64,
}

impl Event {
    pub fn new(kind: EventKind, timestamp: f64) -> Self {
        Self { kind, timestamp }
    }

    /// Stamp `kind` with the current wall-clock time
    pub fn now(kind: EventKind) -> Self {
        Self::new(kind, current_epoch_secs())
    }
}

/// Current wall-clock time in fractional seconds since the Unix epoch
pub fn current_epoch_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}
