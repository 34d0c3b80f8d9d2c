use thiserror::Error;

/// Startup-time configuration failures. All variants are fatal: main logs
/// them and exits before the listener binds, so the service never serves
/// requests half-initialized.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("artifact unavailable at '{path}': {source}")]
    ArtifactUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("artifact at '{path}' is malformed: {source}")]
    ArtifactMalformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("artifact '{artifact}' schema mismatch: expected field '{expected}' at position {position}, found '{found}'")]
    SchemaMismatch {
        artifact: String,
        position: usize,
        expected: String,
        found: String,
    },
    #[error("artifact '{artifact}' invalid: {reason}")]
    ArtifactInvalid { artifact: String, reason: String },
    #[error("invalid limits config: {0}")]
    InvalidLimits(String),
    #[error("failed to read limits config '{path}': {source}")]
    LimitsUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse limits config '{path}': {source}")]
    LimitsMalformed {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}
