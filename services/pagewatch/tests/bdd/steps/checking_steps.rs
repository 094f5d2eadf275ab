//! BDD step definitions for page checking feature

use std::sync::Arc;

use cucumber::{gherkin::Step, given, then, when};
use pagewatch::engine::{Engine, RunMode};
use pagewatch::io::HttpClient;
use pagewatch::requirement::RequirementRegistry;
use pagewatch::{EventLog, PagesConfig};
use tokio_util::sync::CancellationToken;

use crate::world::{PagewatchWorld, Scripted};

#[given("the pages config:")]
fn pages_config(world: &mut PagewatchWorld, step: &Step) {
    let json = step.docstring.as_ref().expect("config docstring missing");
    let pages = PagesConfig::from_json(json).expect("invalid pages config");
    world.pages = pages
        .iter()
        .map(|(name, page)| (name.to_string(), page.clone()))
        .collect();
}

#[given(expr = "{string} responds with {string}")]
async fn url_responds_with(world: &mut PagewatchWorld, url: String, body: String) {
    world.http.script(&url, Scripted::Body(body)).await;
}

#[given(expr = "{string} fails with {string}")]
async fn url_fails_with(world: &mut PagewatchWorld, url: String, error: String) {
    world.http.script(&url, Scripted::ConnectionError(error)).await;
}

#[when("a single pass runs")]
async fn single_pass_runs(world: &mut PagewatchWorld) {
    let log_path = world.log_path();
    let log = EventLog::open(&log_path, false).expect("failed to open event log");
    let http: Arc<dyn HttpClient> = world.http.clone();

    let mut engine = Engine::new(
        PagesConfig::new(world.pages.clone()),
        http,
        RequirementRegistry::with_defaults(),
        log,
        RunMode::Single,
        CancellationToken::new(),
    );
    world.run_result = Some(engine.run().await);
    world.log = Some(EventLog::load(&log_path).expect("failed to reload event log"));
}

#[then("the run succeeds")]
fn run_succeeds(world: &mut PagewatchWorld) {
    match world.run_result.as_ref().expect("no run happened") {
        Ok(()) => {}
        Err(e) => panic!("run failed: {}", e),
    }
}

#[then(expr = "page {string} has events {string}")]
fn page_has_events(world: &mut PagewatchWorld, page: String, expected: String) {
    let actual: Vec<&str> = world
        .log_mut()
        .events(&page)
        .iter()
        .map(|e| e.kind.type_name())
        .collect();
    let expected: Vec<&str> = expected.split(", ").collect();
    assert_eq!(actual, expected, "events recorded for {}", page);
}

#[then(expr = "page {string} has a failed response mentioning {string}")]
fn page_has_failed_response(world: &mut PagewatchWorld, page: String, text: String) {
    let events = world.log_mut().events(&page);
    assert_eq!(events.len(), 1, "expected a single event for {}", page);
    match &events[0].kind {
        pagewatch::EventKind::ResponseFailed { error } => {
            assert!(error.contains(&text), "error {:?} lacks {:?}", error, text)
        }
        other => panic!("expected response_failed, got {:?}", other),
    }
}

#[then(expr = "{string} was requested {int} time(s)")]
async fn url_requested(world: &mut PagewatchWorld, url: String, times: usize) {
    let requests = world.http.requests.read().await;
    let count = requests.iter().filter(|r| **r == url).count();
    assert_eq!(count, times, "requests made: {:?}", *requests);
}
