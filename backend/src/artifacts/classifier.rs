use ndarray::Array1;
use serde::Deserialize;
use shared::{FEATURE_COUNT, FeatureVector};

use crate::artifacts::{ArtifactSchema, read_artifact};
use crate::error::ConfigError;

/// A fitted binary decision function over scaled features. Returns the
/// class (1 = good quality, 0 = not good) and the probability distribution
/// [p0, p1] as two independent outputs; callers must not rederive one from
/// the other.
pub trait Classifier: Send + Sync {
    fn classify(&self, fv: &FeatureVector) -> (u8, [f64; 2]);
}

#[derive(Debug, Deserialize)]
struct ClassifierArtifact {
    schema: ArtifactSchema,
    weights: Vec<f64>,
    intercept: f64,
}

/// Fitted binary logistic regression: p1 = sigmoid(w . x + b).
#[derive(Debug)]
pub struct LogisticModel {
    weights: Array1<f64>,
    intercept: f64,
}

impl LogisticModel {
    pub fn load(path: &str) -> Result<LogisticModel, ConfigError> {
        let artifact: ClassifierArtifact = read_artifact(path)?;
        artifact.schema.verify("classifier")?;
        if artifact.weights.len() != FEATURE_COUNT {
            return Err(ConfigError::ArtifactInvalid {
                artifact: "classifier".to_string(),
                reason: format!(
                    "expected {} weights, found {}",
                    FEATURE_COUNT,
                    artifact.weights.len()
                ),
            });
        }
        if !artifact.intercept.is_finite()
            || artifact.weights.iter().any(|w| !w.is_finite())
        {
            return Err(ConfigError::ArtifactInvalid {
                artifact: "classifier".to_string(),
                reason: "weights and intercept must be finite".to_string(),
            });
        }
        Ok(LogisticModel {
            weights: Array1::from_vec(artifact.weights),
            intercept: artifact.intercept,
        })
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl Classifier for LogisticModel {
    fn classify(&self, fv: &FeatureVector) -> (u8, [f64; 2]) {
        let x = Array1::from_iter(fv.to_array());
        let p1 = sigmoid(self.weights.dot(&x) + self.intercept);
        let class = if p1 >= 0.5 { 1 } else { 0 };
        (class, [1.0 - p1, p1])
    }
}
