//! Given steps for extraction routing scenarios.

use std::sync::Arc;
use std::time::Duration;

use super::world::{ExtractionWorld, StalledMetadataWorker, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use serde_json::json;
use workbridge::worker::{
    domain::{InvocationId, TerminalEvent, TerminalEventType},
    ports::EventTransport,
};

#[given("the packaged documents")]
fn packaged_documents(world: &mut ExtractionWorld) {
    world.use_shipped_mapping();
}

#[given(r#"an "{event_type}" event carrying only an API key"#)]
fn event_with_only_api_key(world: &mut ExtractionWorld, event_type: String) {
    world.events.push(json!({
        "payload": {
            "event_type": event_type,
            "connection_data": {"key": "k"}
        },
        "context": {"secrets": {"service_account_token": "t"}}
    }));
}

#[given(r#"an "{event_type}" event without an external sync unit"#)]
fn event_without_sync_unit(world: &mut ExtractionWorld, event_type: String) {
    world.events.push(json!({
        "payload": {
            "event_type": event_type,
            "connection_data": {"key": "k", "org_id": "s"},
            "event_context": {}
        },
        "context": {"secrets": {"service_account_token": "t"}}
    }));
}

#[given(r#"a fully populated "{event_type}" event"#)]
fn fully_populated_event(world: &mut ExtractionWorld, event_type: String) {
    world.events.push(json!({
        "payload": {
            "event_type": event_type,
            "connection_data": {"key": "api-key", "org_id": "space-1", "org_name": "Acme"},
            "event_context": {"external_sync_unit_id": "project-7", "sync_run_id": "run-1"}
        },
        "context": {"secrets": {"service_account_token": "token"}}
    }));
}

#[given(r#"a domain mapping whose stage transformation method is "{method}""#)]
fn mapping_with_stage_method(world: &mut ExtractionWorld, method: String) -> Result<(), eyre::Report> {
    world.use_shipped_mapping();
    let mut value = serde_json::to_value(&world.mapping).wrap_err("serialize shipped mapping")?;
    let transformation = value
        .pointer_mut(
            "/additional_mappings/record_type_mappings/tasks/possible_record_type_mappings/0\
             /shard/stock_field_mappings/stage/transformation_method_for_set",
        )
        .ok_or_else(|| eyre::eyre!("shipped mapping has no stage transformation"))?;
    transformation["transformation_method"] = json!(method);
    world.mapping = serde_json::from_value(value).wrap_err("rebuild mapping document")?;
    Ok(())
}

#[given("a metadata worker that never finishes")]
fn stalled_metadata_worker(world: &mut ExtractionWorld) {
    world.registry.register(Arc::new(StalledMetadataWorker));
}

#[given("a worker timeout of {millis:u64} milliseconds")]
fn worker_timeout(world: &mut ExtractionWorld, millis: u64) {
    world.timeout = Duration::from_millis(millis);
}

#[given(r#"an invocation that emitted "{event_type}""#)]
fn invocation_that_emitted(
    world: &mut ExtractionWorld,
    event_type: String,
) -> Result<(), eyre::Report> {
    let event_type: TerminalEventType =
        serde_json::from_value(json!(event_type)).wrap_err("parse terminal event type")?;
    let invocation = InvocationId::new();
    run_async(world.monitor.send(
        invocation,
        &TerminalEvent {
            event_type,
            event_data: json!({}),
        },
    ))
    .wrap_err("record first terminal event")?;
    world.invocation = Some(invocation);
    Ok(())
}
