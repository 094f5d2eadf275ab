//! Page checker: one request per page, then every requirement against the body

use std::time::Instant;

use crate::config::PageConfig;
use crate::event::EventKind;
use crate::event_log::EventLog;
use crate::io::HttpClient;
use crate::requirement::RequirementRegistry;

/// Fetch `page` once and record the outcome in `log`.
///
/// Transport failures are recorded as [`EventKind::ResponseFailed`] and are
/// not errors. Unknown requirement names and invalid patterns are returned
/// as errors and stop the check.
pub async fn check_page(
    name: &str,
    page: &PageConfig,
    http: &dyn HttpClient,
    registry: &RequirementRegistry,
    log: &mut EventLog,
) -> crate::Result<()> {
    tracing::debug!("Checking '{}' at {}", name, page.url);

    let started = Instant::now();
    let response = match http.get(&page.url).await {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!("Request for '{}' failed: {}", name, e);
            log.add_event(
                name,
                EventKind::ResponseFailed {
                    error: e.to_string(),
                },
            );
            return Ok(());
        }
    };
    let duration = started.elapsed().as_secs_f64();
    log.add_event(name, EventKind::ResponseReceived { duration });

    for requirement in &page.requirements {
        let kind = if registry.evaluate(requirement, &response.body)? {
            EventKind::RequirementPassed {
                requirement: requirement.clone(),
            }
        } else {
            EventKind::RequirementFailed {
                requirement: requirement.clone(),
            }
        };
        log.add_event(name, kind);
    }

    Ok(())
}
