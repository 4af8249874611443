//! When steps for extraction routing scenarios.

use std::time::Duration;

use super::world::{ExtractionWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use serde_json::json;
use workbridge::worker::{
    domain::{TerminalEvent, TerminalEventType},
    ports::EventTransport,
};

#[when("the events are routed")]
fn route_events(world: &mut ExtractionWorld) {
    let router = world.router();
    world.outcome = Some(run_async(router.route(&world.events)));
}

#[when(r#"the same invocation emits "{event_type}" {millis:u64} milliseconds later"#)]
fn emit_again_later(
    world: &mut ExtractionWorld,
    event_type: String,
    millis: u64,
) -> Result<(), eyre::Report> {
    let invocation = world
        .invocation
        .ok_or_else(|| eyre::eyre!("missing invocation in scenario world"))?;
    let event_type: TerminalEventType =
        serde_json::from_value(json!(event_type)).wrap_err("parse terminal event type")?;
    run_async(async {
        tokio::time::sleep(Duration::from_millis(millis)).await;
        world
            .monitor
            .send(invocation, &TerminalEvent::error(event_type.phase(), "late failure"))
            .await
    })
    .wrap_err("record second terminal event")?;
    Ok(())
}
