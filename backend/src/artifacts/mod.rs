pub mod classifier;
pub mod scaler;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared::field_names;

use crate::error::ConfigError;

/// Field order an artifact was fitted with. Every artifact carries one and
/// it must match the canonical schema exactly; a positional mismatch would
/// corrupt predictions without any runtime error, so loading fails instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactSchema {
    pub version: u32,
    pub fields: Vec<String>,
}

impl ArtifactSchema {
    pub fn verify(&self, artifact: &str) -> Result<(), ConfigError> {
        let expected = field_names();
        let len = expected.len().max(self.fields.len());
        for position in 0..len {
            let want = expected.get(position).copied().unwrap_or("<none>");
            let got = self
                .fields
                .get(position)
                .map(String::as_str)
                .unwrap_or("<none>");
            if want != got {
                return Err(ConfigError::SchemaMismatch {
                    artifact: artifact.to_string(),
                    position,
                    expected: want.to_string(),
                    found: got.to_string(),
                });
            }
        }
        Ok(())
    }
}

pub(crate) fn read_artifact<T: DeserializeOwned>(path: &str) -> Result<T, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ArtifactUnavailable {
        path: path.to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::ArtifactMalformed {
        path: path.to_string(),
        source,
    })
}
