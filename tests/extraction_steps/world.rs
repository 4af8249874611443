//! Shared world state for extraction routing scenarios.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use rstest::fixture;
use serde_json::{Value, json};
use workbridge::{
    extraction::{
        adapters::{InProcessSpawner, memory::StaticDocumentSource},
        domain::{ExtractionPhase, RouteOutcome},
        services::ExtractionRouter,
    },
    mapping::domain::DomainMappingDocument,
    metadata::domain::ExternalMetadataDocument,
    worker::{
        adapters::memory::{InMemoryItemRepository, InMemorySourceApi, TerminalContractMonitor},
        domain::InvocationId,
        emitter::{Emitted, TerminalEmitter},
        ports::{EventTransport, PhaseWorker, WorkerAdapter, WorkerContext},
        services::WorkerRegistry,
    },
};

/// Router type used by the scenarios.
pub type TestRouter = ExtractionRouter<InProcessSpawner, StaticDocumentSource>;

static SHIPPED_MAPPING: Lazy<DomainMappingDocument> = Lazy::new(|| {
    DomainMappingDocument::from_json(include_str!("../../documents/initial_domain_mapping.json"))
        .expect("shipped mapping should parse")
});

static SHIPPED_METADATA: Lazy<ExternalMetadataDocument> = Lazy::new(|| {
    ExternalMetadataDocument::from_json(include_str!(
        "../../documents/external_domain_metadata.json"
    ))
    .expect("shipped metadata should parse")
});

/// Metadata worker that never reaches its emitter.
pub struct StalledMetadataWorker;

#[async_trait]
impl PhaseWorker for StalledMetadataWorker {
    fn phase(&self) -> ExtractionPhase {
        ExtractionPhase::Metadata
    }

    async fn run(&self, _context: WorkerContext, emitter: TerminalEmitter) -> Emitted {
        tokio::time::sleep(Duration::from_secs(600)).await;
        emitter.done(json!({})).await
    }
}

/// Scenario world for extraction routing behaviour tests.
pub struct ExtractionWorld {
    pub monitor: Arc<TerminalContractMonitor>,
    pub repository: Arc<InMemoryItemRepository>,
    pub mapping: DomainMappingDocument,
    pub registry: WorkerRegistry,
    pub timeout: Duration,
    pub events: Vec<Value>,
    pub outcome: Option<RouteOutcome>,
    pub invocation: Option<InvocationId>,
}

impl ExtractionWorld {
    /// Creates a world backed by the packaged documents and default workers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            monitor: Arc::new(TerminalContractMonitor::default()),
            repository: Arc::new(InMemoryItemRepository::new()),
            mapping: SHIPPED_MAPPING.clone(),
            registry: WorkerRegistry::with_default_workers(),
            timeout: Duration::from_secs(5),
            events: Vec::new(),
            outcome: None,
            invocation: None,
        }
    }

    /// Restores the packaged Domain Mapping Document.
    pub fn use_shipped_mapping(&mut self) {
        self.mapping = SHIPPED_MAPPING.clone();
    }

    /// Builds a router over the world's current collaborators.
    #[must_use]
    pub fn router(&self) -> TestRouter {
        let documents = Arc::new(StaticDocumentSource::new(
            self.mapping.clone(),
            SHIPPED_METADATA.clone(),
        ));
        let adapter = WorkerAdapter {
            repository: self.repository.clone(),
            source: Arc::new(InMemorySourceApi::new("space-1", "api-key")),
            documents: documents.clone(),
        };
        let transport: Arc<dyn EventTransport> = self.monitor.clone();
        let spawner = InProcessSpawner::new(self.registry.clone(), adapter, transport, self.timeout);
        ExtractionRouter::new(Arc::new(spawner), documents)
    }
}

impl Default for ExtractionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ExtractionWorld {
    ExtractionWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
