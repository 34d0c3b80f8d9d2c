use std::collections::HashMap;

use log::{debug, info};
use shared::{
    FEATURE_COUNT, FIELD_SPECS, FeatureVector, FieldSpec, PredictionResponse, QualityLabel,
    ValidationError,
};

use crate::artifacts::classifier::Classifier;
use crate::artifacts::scaler::Scaler;

/// The one pipeline both dashboard variants share: validate -> scale ->
/// classify -> format. Holds the loaded artifacts as read-only state; an
/// `Arc<InferenceService>` is shared across all workers and never mutated
/// after construction.
pub struct InferenceService {
    scaler: Box<dyn Scaler>,
    classifier: Box<dyn Classifier>,
    limits: [FieldSpec; FEATURE_COUNT],
}

impl InferenceService {
    pub fn new(scaler: Box<dyn Scaler>, classifier: Box<dyn Classifier>) -> Self {
        Self::with_limits(scaler, classifier, FIELD_SPECS)
    }

    pub fn with_limits(
        scaler: Box<dyn Scaler>,
        classifier: Box<dyn Classifier>,
        limits: [FieldSpec; FEATURE_COUNT],
    ) -> Self {
        Self {
            scaler,
            classifier,
            limits,
        }
    }

    /// Active per-field bounds and defaults, for the schema endpoint.
    pub fn limits(&self) -> &[FieldSpec; FEATURE_COUNT] {
        &self.limits
    }

    /// Runs one prediction request. Any validation failure aborts the whole
    /// request before the scaler is touched; nothing is returned
    /// half-computed. Deterministic for fixed artifacts, so failures are
    /// never retried.
    pub fn predict(
        &self,
        raw: &HashMap<String, f64>,
    ) -> Result<PredictionResponse, ValidationError> {
        let input = FeatureVector::build_with_bounds(raw, &self.limits).inspect_err(|e| {
            debug!("rejected prediction input: {e}");
        })?;

        let scaled = self.scaler.scale(&input);
        let (class, probs) = self.classifier.classify(&scaled);
        let label = QualityLabel::from_class(class);
        // Confidence is the mass assigned to the predicted class, taken
        // straight from the distribution rather than recomputed.
        let confidence = if class == 1 { probs[1] } else { probs[0] };

        info!("prediction: label={label} confidence={confidence:.4}");
        Ok(PredictionResponse {
            label,
            confidence,
            input,
        })
    }
}
