//! Document source serving documents held in memory.

use crate::extraction::ports::{DocumentLoadError, DocumentSource, DocumentSourceResult};
use crate::mapping::domain::DomainMappingDocument;
use crate::metadata::domain::ExternalMetadataDocument;
use async_trait::async_trait;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

/// Serves fixed documents (or fixed load failures) and counts loads.
#[derive(Debug, Clone)]
pub struct StaticDocumentSource {
    domain_mapping: DocumentSourceResult<DomainMappingDocument>,
    external_metadata: DocumentSourceResult<ExternalMetadataDocument>,
    loads: Arc<AtomicUsize>,
}

impl StaticDocumentSource {
    /// Creates a source serving the given documents.
    #[must_use]
    pub fn new(
        domain_mapping: DomainMappingDocument,
        external_metadata: ExternalMetadataDocument,
    ) -> Self {
        Self {
            domain_mapping: Ok(domain_mapping),
            external_metadata: Ok(external_metadata),
            loads: Arc::default(),
        }
    }

    /// Replaces the Domain Mapping Document with a load failure.
    #[must_use]
    pub fn failing_domain_mapping(mut self, err: DocumentLoadError) -> Self {
        self.domain_mapping = Err(err);
        self
    }

    /// Replaces the External Metadata Document with a load failure.
    #[must_use]
    pub fn failing_external_metadata(mut self, err: DocumentLoadError) -> Self {
        self.external_metadata = Err(err);
        self
    }

    /// Returns how many loads were requested.
    #[must_use]
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentSource for StaticDocumentSource {
    async fn load_domain_mapping(&self) -> DocumentSourceResult<DomainMappingDocument> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.domain_mapping.clone()
    }

    async fn load_external_metadata(&self) -> DocumentSourceResult<ExternalMetadataDocument> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.external_metadata.clone()
    }
}
