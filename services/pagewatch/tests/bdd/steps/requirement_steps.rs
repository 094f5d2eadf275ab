//! BDD step definitions for requirement feature

use cucumber::{given, then, when};
use pagewatch::requirement::RequirementRegistry;
use pagewatch::{PagewatchError, Requirement};

use crate::world::PagewatchWorld;

fn parse_outcome(s: &str) -> bool {
    match s {
        "passes" => true,
        "fails" => false,
        other => panic!("Unknown outcome: {}", other),
    }
}

#[given(expr = "the page text {string}")]
fn page_text(world: &mut PagewatchWorld, text: String) {
    world.page_text = Some(text);
}

#[when(expr = "the requirement {word} with {string} is checked")]
fn requirement_checked(world: &mut PagewatchWorld, name: String, pattern: String) {
    let text = world.page_text.clone().unwrap_or_default();
    let registry = RequirementRegistry::with_defaults();
    world.check_result = Some(registry.evaluate(&Requirement::new(name, [pattern]), &text));
}

#[then(expr = "the requirement {word}")]
fn requirement_outcome(world: &mut PagewatchWorld, outcome: String) {
    let expected = parse_outcome(&outcome);
    match world.check_result.as_ref().expect("no requirement checked") {
        Ok(passed) => assert_eq!(*passed, expected),
        Err(e) => panic!("requirement check failed: {}", e),
    }
}

#[then(expr = "the check reports unknown requirement {string}")]
fn unknown_requirement(world: &mut PagewatchWorld, expected: String) {
    match world.check_result.as_ref().expect("no requirement checked") {
        Err(PagewatchError::UnknownRequirement(name)) => assert_eq!(*name, expected),
        other => panic!("expected unknown requirement, got {:?}", other),
    }
}
