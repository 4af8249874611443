//! Shared event and document fixtures.

use crate::extraction::adapters::memory::StaticDocumentSource;
use crate::extraction::domain::{PhaseInitialState, ValidatedEvent};
use crate::extraction::ports::SpawnRequest;
use crate::mapping::domain::DomainMappingDocument;
use crate::metadata::domain::ExternalMetadataDocument;
use crate::worker::{
    adapters::memory::{InMemoryItemRepository, InMemorySourceApi},
    domain::{SourceContact, SourceProject, SourceTask},
    ports::WorkerAdapter,
};
use serde_json::{Value, json};
use std::sync::Arc;

pub(super) const SHIPPED_MAPPING: &str =
    include_str!("../../../documents/initial_domain_mapping.json");
pub(super) const SHIPPED_METADATA: &str =
    include_str!("../../../documents/external_domain_metadata.json");

pub(super) fn shipped_mapping() -> DomainMappingDocument {
    DomainMappingDocument::from_json(SHIPPED_MAPPING).expect("shipped mapping should parse")
}

pub(super) fn shipped_metadata() -> ExternalMetadataDocument {
    ExternalMetadataDocument::from_json(SHIPPED_METADATA).expect("shipped metadata should parse")
}

pub(super) fn shipped_documents() -> StaticDocumentSource {
    StaticDocumentSource::new(shipped_mapping(), shipped_metadata())
}

/// A fully populated event of the given type.
pub(super) fn event(event_type: &str) -> Value {
    json!({
        "payload": {
            "event_type": event_type,
            "connection_data": {"key": "api-key", "org_id": "space-1", "org_name": "Acme"},
            "event_context": {
                "external_sync_unit_id": "project-7",
                "sync_run_id": "run-42",
                "callback_url": "https://platform.test/callback"
            }
        },
        "context": {"secrets": {"service_account_token": "token"}},
        "execution_metadata": {"function_name": "extraction"}
    })
}

/// Removes the value at `pointer`'s last segment from its parent object.
pub(super) fn without(mut value: Value, pointer: &str) -> Value {
    let (parent, key) = pointer
        .rsplit_once('/')
        .expect("pointer should have a parent");
    value
        .pointer_mut(parent)
        .and_then(Value::as_object_mut)
        .expect("parent should be an object")
        .remove(key);
    value
}

/// Scenario A: metadata start with partial connection data.
pub(super) fn scenario_a() -> Value {
    json!({
        "payload": {
            "event_type": "EXTRACTION_METADATA_START",
            "connection_data": {"key": "k"}
        },
        "context": {"secrets": {"service_account_token": "t"}}
    })
}

/// Scenario B: data start without a sync unit.
pub(super) fn scenario_b() -> Value {
    json!({
        "payload": {
            "event_type": "EXTRACTION_DATA_START",
            "connection_data": {"key": "k", "org_id": "s"},
            "event_context": {}
        },
        "context": {"secrets": {"service_account_token": "t"}}
    })
}

/// Source space matching the credentials in [`event`].
pub(super) fn source_api() -> InMemorySourceApi {
    InMemorySourceApi::new("space-1", "api-key")
        .with_project(
            SourceProject {
                id: "project-7".to_owned(),
                title: Some("Website relaunch".to_owned()),
                ..SourceProject::default()
            },
            vec![SourceTask {
                id: "task-1".to_owned(),
                title: Some("Draft copy".to_owned()),
                responsible_ids: Some(vec!["user-1".to_owned()]),
                ..SourceTask::default()
            }],
        )
        .with_member(SourceContact {
            id: "user-1".to_owned(),
            first_name: Some("Ada".to_owned()),
            last_name: Some("Lovelace".to_owned()),
            email: Some("ada@example.test".to_owned()),
            ..SourceContact::default()
        })
}

pub(super) fn worker_adapter(repository: Arc<InMemoryItemRepository>) -> WorkerAdapter {
    WorkerAdapter {
        repository,
        source: Arc::new(source_api()),
        documents: Arc::new(shipped_documents()),
    }
}

/// Spawn request the router would build for a fully populated event.
pub(super) fn spawn_request(event_type: &str) -> SpawnRequest {
    let validated = ValidatedEvent::from_value(&event(event_type)).expect("event should validate");
    let initial_state = PhaseInitialState::for_event(&validated);
    SpawnRequest {
        worker: validated.phase(),
        event: Arc::new(validated),
        initial_domain_mapping: Arc::new(shipped_mapping()),
        initial_state,
    }
}
