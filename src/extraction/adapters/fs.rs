//! Document source reading the packaging directory through `cap-std`.

use crate::config::ExtractorConfig;
use crate::extraction::ports::{
    DocumentKind, DocumentLoadError, DocumentSource, DocumentSourceResult,
};
use crate::mapping::domain::DomainMappingDocument;
use crate::metadata::domain::ExternalMetadataDocument;
use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io::ErrorKind;
use std::sync::Arc;
use tracing::debug;

/// Loads documents from a capability handle on the documents directory.
///
/// File names are resolved inside that directory only.
#[derive(Debug, Clone)]
pub struct CapStdDocumentSource {
    dir: Arc<Dir>,
    domain_mapping_file: String,
    external_metadata_file: String,
}

impl CapStdDocumentSource {
    /// Opens `config.documents_dir`.
    ///
    /// # Errors
    ///
    /// Returns the I/O error when the directory cannot be opened.
    pub fn open(config: &ExtractorConfig) -> std::io::Result<Self> {
        let dir = Dir::open_ambient_dir(&config.documents_dir, ambient_authority())?;
        Ok(Self {
            dir: Arc::new(dir),
            domain_mapping_file: config.domain_mapping_file.clone(),
            external_metadata_file: config.external_metadata_file.clone(),
        })
    }

    async fn read(&self, document: DocumentKind, file: &str) -> DocumentSourceResult<String> {
        let dir = Arc::clone(&self.dir);
        let path = file.to_owned();
        debug!(%document, path = %path, "reading packaged document");
        tokio::task::spawn_blocking(move || dir.read_to_string(&path))
            .await
            .map_err(|err| DocumentLoadError::io(document, err))?
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => DocumentLoadError::NotFound {
                    document,
                    path: file.to_owned(),
                },
                _ => DocumentLoadError::io(document, err),
            })
    }
}

#[async_trait]
impl DocumentSource for CapStdDocumentSource {
    async fn load_domain_mapping(&self) -> DocumentSourceResult<DomainMappingDocument> {
        let document = DocumentKind::DomainMapping;
        let text = self.read(document, &self.domain_mapping_file).await?;
        DomainMappingDocument::from_json(&text).map_err(|err| DocumentLoadError::parse(document, &err))
    }

    async fn load_external_metadata(&self) -> DocumentSourceResult<ExternalMetadataDocument> {
        let document = DocumentKind::ExternalMetadata;
        let text = self.read(document, &self.external_metadata_file).await?;
        ExternalMetadataDocument::from_json(&text)
            .map_err(|err| DocumentLoadError::parse(document, &err))
    }
}
