use ndarray::Array1;
use serde::Deserialize;
use shared::{FEATURE_COUNT, FeatureVector};

use crate::artifacts::{ArtifactSchema, read_artifact};
use crate::error::ConfigError;

/// A fitted transform mapping raw measurements into the space the
/// classifier was trained on. Pure and deterministic for a fixed artifact.
pub trait Scaler: Send + Sync {
    fn scale(&self, fv: &FeatureVector) -> FeatureVector;
}

#[derive(Debug, Deserialize)]
struct ScalerArtifact {
    schema: ArtifactSchema,
    mean: Vec<f64>,
    scale: Vec<f64>,
}

/// Per-feature standardization: (x - mean) / scale, in schema order.
#[derive(Debug)]
pub struct StandardScaler {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl StandardScaler {
    pub fn load(path: &str) -> Result<StandardScaler, ConfigError> {
        let artifact: ScalerArtifact = read_artifact(path)?;
        artifact.schema.verify("scaler")?;
        if artifact.mean.len() != FEATURE_COUNT || artifact.scale.len() != FEATURE_COUNT {
            return Err(ConfigError::ArtifactInvalid {
                artifact: "scaler".to_string(),
                reason: format!(
                    "expected {} mean/scale entries, found {}/{}",
                    FEATURE_COUNT,
                    artifact.mean.len(),
                    artifact.scale.len()
                ),
            });
        }
        if artifact.scale.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(ConfigError::ArtifactInvalid {
                artifact: "scaler".to_string(),
                reason: "scale entries must be finite and positive".to_string(),
            });
        }
        Ok(StandardScaler {
            mean: Array1::from_vec(artifact.mean),
            scale: Array1::from_vec(artifact.scale),
        })
    }
}

impl Scaler for StandardScaler {
    fn scale(&self, fv: &FeatureVector) -> FeatureVector {
        let raw = Array1::from_iter(fv.to_array());
        let scaled = (raw - &self.mean) / &self.scale;
        let mut values = [0.0f64; FEATURE_COUNT];
        for (slot, value) in values.iter_mut().zip(scaled.iter()) {
            *slot = *value;
        }
        FeatureVector::from_array(values)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use shared::field_names;

    use super::*;

    fn artifact_json(fields: Vec<&str>, mean: Vec<f64>, scale: Vec<f64>) -> String {
        serde_json::json!({
            "schema": { "version": 1, "fields": fields },
            "mean": mean,
            "scale": scale,
        })
        .to_string()
    }

    fn write_artifact(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn load_and_scale() {
        let mut mean = vec![0.0; FEATURE_COUNT];
        let mut scale = vec![1.0; FEATURE_COUNT];
        mean[0] = 7.0;
        scale[0] = 2.0;
        let file = write_artifact(&artifact_json(field_names().to_vec(), mean, scale));

        let scaler = StandardScaler::load(file.path().to_str().unwrap()).unwrap();
        let fv = FeatureVector::default_input();
        let scaled = scaler.scale(&fv);
        assert!((scaled.fixed_acidity - (7.4 - 7.0) / 2.0).abs() < 1e-12);
        assert_eq!(scaled.alcohol, fv.alcohol);
    }

    #[test]
    fn load_missing_file_is_artifact_unavailable() {
        let err = StandardScaler::load("/nonexistent/scaler.json").unwrap_err();
        assert!(matches!(err, ConfigError::ArtifactUnavailable { .. }));
    }

    #[test]
    fn load_garbage_is_artifact_malformed() {
        let file = write_artifact("not json at all");
        let err = StandardScaler::load(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ConfigError::ArtifactMalformed { .. }));
    }

    #[test]
    fn load_scrambled_schema_fails_fast() {
        let mut fields = field_names().to_vec();
        fields.swap(3, 4);
        let file = write_artifact(&artifact_json(
            fields,
            vec![0.0; FEATURE_COUNT],
            vec![1.0; FEATURE_COUNT],
        ));
        let err = StandardScaler::load(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ConfigError::SchemaMismatch { position: 3, .. }));
    }

    #[test]
    fn load_rejects_zero_scale_entry() {
        let mut scale = vec![1.0; FEATURE_COUNT];
        scale[5] = 0.0;
        let file = write_artifact(&artifact_json(
            field_names().to_vec(),
            vec![0.0; FEATURE_COUNT],
            scale,
        ));
        let err = StandardScaler::load(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ConfigError::ArtifactInvalid { .. }));
    }
}
