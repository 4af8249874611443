//! Adapter configuration: where the packaged documents live and how long a
//! worker may run.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//! use workbridge::config::ExtractorConfig;
//!
//! let config = ExtractorConfig::default().with_worker_timeout(Duration::from_secs(30));
//! assert_eq!(config.domain_mapping_file, "initial_domain_mapping.json");
//! assert_eq!(config.worker_timeout, Duration::from_secs(30));
//! ```

use camino::Utf8PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable overriding [`ExtractorConfig::documents_dir`].
pub const DOCUMENTS_DIR_ENV: &str = "WORKBRIDGE_DOCUMENTS_DIR";
/// Environment variable overriding [`ExtractorConfig::worker_timeout`], in
/// whole seconds.
pub const WORKER_TIMEOUT_ENV: &str = "WORKBRIDGE_WORKER_TIMEOUT_SECS";

/// Platform deadline for one worker invocation.
pub const DEFAULT_WORKER_TIMEOUT: Duration = Duration::from_secs(12 * 60);

/// Configuration for routing and running extraction workers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Directory holding the packaged static documents.
    pub documents_dir: Utf8PathBuf,
    /// Domain Mapping Document file name inside `documents_dir`.
    pub domain_mapping_file: String,
    /// External Metadata Document file name inside `documents_dir`.
    pub external_metadata_file: String,
    /// How long a worker may run before its timeout callback fires.
    pub worker_timeout: Duration,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            documents_dir: Utf8PathBuf::from("."),
            domain_mapping_file: "initial_domain_mapping.json".to_owned(),
            external_metadata_file: "external_domain_metadata.json".to_owned(),
            worker_timeout: DEFAULT_WORKER_TIMEOUT,
        }
    }
}

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but not valid Unicode.
    #[error("environment variable {0} is not valid unicode")]
    NotUnicode(&'static str),

    /// A variable holds an unusable value.
    #[error("environment variable {name} has invalid value '{value}': {reason}")]
    InvalidValue {
        /// Variable name.
        name: &'static str,
        /// Value found.
        value: String,
        /// Description of the problem.
        reason: String,
    },
}

impl ExtractorConfig {
    /// Reads overrides from the process environment on top of the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| match std::env::var(name) {
            Ok(value) => Ok(Some(value)),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(std::env::VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode(name)),
        })
    }

    /// Reads overrides through `lookup`, which returns `None` for unset
    /// variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an unusable value,
    /// or the error `lookup` itself reported.
    pub fn from_lookup<F>(mut lookup: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&'static str) -> Result<Option<String>, ConfigError>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup(DOCUMENTS_DIR_ENV)? {
            if dir.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    name: DOCUMENTS_DIR_ENV,
                    value: dir,
                    reason: "must not be empty".to_owned(),
                });
            }
            config.documents_dir = Utf8PathBuf::from(dir);
        }

        if let Some(raw) = lookup(WORKER_TIMEOUT_ENV)? {
            config.worker_timeout = parse_timeout(raw)?;
        }

        Ok(config)
    }

    /// Sets the documents directory.
    #[must_use]
    pub fn with_documents_dir(mut self, documents_dir: impl Into<Utf8PathBuf>) -> Self {
        self.documents_dir = documents_dir.into();
        self
    }

    /// Sets the Domain Mapping Document file name.
    #[must_use]
    pub fn with_domain_mapping_file(mut self, file: impl Into<String>) -> Self {
        self.domain_mapping_file = file.into();
        self
    }

    /// Sets the External Metadata Document file name.
    #[must_use]
    pub fn with_external_metadata_file(mut self, file: impl Into<String>) -> Self {
        self.external_metadata_file = file.into();
        self
    }

    /// Sets the worker timeout.
    #[must_use]
    pub const fn with_worker_timeout(mut self, worker_timeout: Duration) -> Self {
        self.worker_timeout = worker_timeout;
        self
    }
}

fn parse_timeout(raw: String) -> Result<Duration, ConfigError> {
    let invalid = |value: String, reason: &str| ConfigError::InvalidValue {
        name: WORKER_TIMEOUT_ENV,
        value,
        reason: reason.to_owned(),
    };
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(invalid(raw, "must be greater than zero")),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(_) => Err(invalid(raw, "expected whole seconds")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup_from(
        vars: &[(&'static str, &str)],
    ) -> impl FnMut(&'static str) -> Result<Option<String>, ConfigError> {
        let vars: HashMap<&'static str, String> = vars
            .iter()
            .map(|(name, value)| (*name, (*value).to_owned()))
            .collect();
        move |name| Ok(vars.get(name).cloned())
    }

    #[rstest]
    fn defaults_apply_without_overrides() {
        let config = ExtractorConfig::from_lookup(lookup_from(&[])).expect("defaults are valid");
        assert_eq!(config, ExtractorConfig::default());
        assert_eq!(config.worker_timeout, Duration::from_secs(720));
        assert_eq!(config.documents_dir, Utf8PathBuf::from("."));
    }

    #[rstest]
    fn overrides_are_applied() {
        let config = ExtractorConfig::from_lookup(lookup_from(&[
            (DOCUMENTS_DIR_ENV, "/opt/workbridge/documents"),
            (WORKER_TIMEOUT_ENV, " 90 "),
        ]))
        .expect("overrides are valid");

        assert_eq!(
            config.documents_dir,
            Utf8PathBuf::from("/opt/workbridge/documents")
        );
        assert_eq!(config.worker_timeout, Duration::from_secs(90));
    }

    #[rstest]
    #[case("0", "greater than zero")]
    #[case("-5", "whole seconds")]
    #[case("1.5", "whole seconds")]
    #[case("soon", "whole seconds")]
    fn bad_timeouts_are_rejected(#[case] raw: &str, #[case] reason: &str) {
        let err = ExtractorConfig::from_lookup(lookup_from(&[(WORKER_TIMEOUT_ENV, raw)]))
            .expect_err("timeout should be rejected");
        assert!(err.to_string().contains(reason), "unexpected error: {err}");
    }

    #[rstest]
    fn blank_documents_dir_is_rejected() {
        let err = ExtractorConfig::from_lookup(lookup_from(&[(DOCUMENTS_DIR_ENV, "  ")]))
            .expect_err("blank directory should be rejected");
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                name: DOCUMENTS_DIR_ENV,
                ..
            }
        ));
    }

    #[rstest]
    fn lookup_errors_propagate() {
        let err = ExtractorConfig::from_lookup(|name| Err(ConfigError::NotUnicode(name)))
            .expect_err("lookup failure should propagate");
        assert_eq!(err, ConfigError::NotUnicode(DOCUMENTS_DIR_ENV));
    }
}
