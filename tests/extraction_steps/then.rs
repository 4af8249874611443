//! Then steps for extraction routing scenarios.

use super::world::ExtractionWorld;
use rstest_bdd_macros::then;
use workbridge::extraction::domain::RouteOutcome;
use workbridge::worker::adapters::memory::TerminalContractViolation;

fn outcome(world: &ExtractionWorld) -> Result<&RouteOutcome, eyre::Report> {
    world
        .outcome
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing route outcome in scenario world"))
}

#[then(r#"routing succeeds with message "{message}""#)]
fn routing_succeeds(world: &ExtractionWorld, message: String) -> Result<(), eyre::Report> {
    let outcome = outcome(world)?;
    if !outcome.success {
        return Err(eyre::eyre!("expected success, got {outcome:?}"));
    }
    if !outcome.message.contains(&message) {
        return Err(eyre::eyre!(
            "expected message containing '{message}', got '{}'",
            outcome.message
        ));
    }
    Ok(())
}

#[then(r#"routing fails with a message containing "{fragment}""#)]
fn routing_fails(world: &ExtractionWorld, fragment: String) -> Result<(), eyre::Report> {
    let outcome = outcome(world)?;
    if outcome.success {
        return Err(eyre::eyre!("expected failure, got {outcome:?}"));
    }
    if !outcome.message.contains(&fragment) {
        return Err(eyre::eyre!(
            "expected message containing '{fragment}', got '{}'",
            outcome.message
        ));
    }
    Ok(())
}

#[then(r#"the worker emitted "{event_type}" exactly once"#)]
fn worker_emitted_once(world: &ExtractionWorld, event_type: String) -> Result<(), eyre::Report> {
    let invocations = world.monitor.invocations();
    let [invocation] = invocations.as_slice() else {
        return Err(eyre::eyre!(
            "expected one invocation, found {}",
            invocations.len()
        ));
    };
    let emission = world
        .monitor
        .verify(*invocation)
        .map_err(|violation| eyre::eyre!("terminal contract broken: {violation}"))?;
    if emission.event.event_type.as_str() != event_type {
        return Err(eyre::eyre!(
            "expected {event_type}, got {}",
            emission.event.event_type
        ));
    }
    Ok(())
}

#[then("no worker was spawned")]
fn no_worker_spawned(world: &ExtractionWorld) -> Result<(), eyre::Report> {
    let invocations = world.monitor.invocations();
    if !invocations.is_empty() {
        return Err(eyre::eyre!(
            "expected no invocations, found {}",
            invocations.len()
        ));
    }
    Ok(())
}

#[then("the monitor reports a done and error violation")]
fn done_and_error_violation(world: &ExtractionWorld) -> Result<(), eyre::Report> {
    let invocation = world
        .invocation
        .ok_or_else(|| eyre::eyre!("missing invocation in scenario world"))?;
    match world.monitor.verify(invocation) {
        Err(TerminalContractViolation::DoneAndError { .. }) => Ok(()),
        other => Err(eyre::eyre!("expected done and error violation, got {other:?}")),
    }
}
