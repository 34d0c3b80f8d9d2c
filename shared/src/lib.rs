use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum_macros::Display;

pub const FEATURE_COUNT: usize = 11;

/// One entry of the canonical feature schema: wire name, plausible physical
/// bounds, and the default the dashboard shows. Array position is the
/// position the scaler and classifier were fitted with.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

pub const FIELD_SPECS: [FieldSpec; FEATURE_COUNT] = [
    FieldSpec { name: "fixed_acidity", min: 0.0, max: 25.0, default: 7.4 },
    FieldSpec { name: "volatile_acidity", min: 0.0, max: 3.0, default: 0.7 },
    FieldSpec { name: "citric_acid", min: 0.0, max: 2.0, default: 0.0 },
    FieldSpec { name: "residual_sugar", min: 0.0, max: 50.0, default: 1.9 },
    FieldSpec { name: "chlorides", min: 0.0, max: 1.0, default: 0.076 },
    FieldSpec { name: "free_sulfur_dioxide", min: 0.0, max: 150.0, default: 11.0 },
    FieldSpec { name: "total_sulfur_dioxide", min: 0.0, max: 500.0, default: 34.0 },
    FieldSpec { name: "density", min: 0.5, max: 1.5, default: 0.9978 },
    FieldSpec { name: "pH", min: 0.0, max: 14.0, default: 3.3 },
    FieldSpec { name: "sulphates", min: 0.0, max: 5.0, default: 0.56 },
    FieldSpec { name: "alcohol", min: 0.0, max: 25.0, default: 9.4 },
];

pub fn field_names() -> [&'static str; FEATURE_COUNT] {
    FIELD_SPECS.map(|spec| spec.name)
}

#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("missing required field '{0}'")]
    MissingField(String),
    #[error("field '{field}' is not a finite number")]
    NotFinite { field: String },
    #[error("field '{field}' value {value} outside allowed range [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("unrecognized field '{0}'")]
    UnknownField(String),
}

impl ValidationError {
    /// The offending field, for structured error responses.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::MissingField(field) => field,
            ValidationError::NotFinite { field } => field,
            ValidationError::OutOfRange { field, .. } => field,
            ValidationError::UnknownField(field) => field,
        }
    }
}

/// The eleven wine-chemistry measurements of one prediction request.
/// Field declaration order matches `FIELD_SPECS`; both the scaler and the
/// classifier were fitted against that order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub fixed_acidity: f64,
    pub volatile_acidity: f64,
    pub citric_acid: f64,
    pub residual_sugar: f64,
    pub chlorides: f64,
    pub free_sulfur_dioxide: f64,
    pub total_sulfur_dioxide: f64,
    pub density: f64,
    #[serde(rename = "pH")]
    pub ph: f64,
    pub sulphates: f64,
    pub alcohol: f64,
}

impl FeatureVector {
    /// Validates a raw name -> value mapping against the schema. All eleven
    /// fields required, all values finite and inside their plausible bounds,
    /// no unrecognized keys. Fails on the first violation.
    pub fn build(raw: &HashMap<String, f64>) -> Result<FeatureVector, ValidationError> {
        Self::build_with_bounds(raw, &FIELD_SPECS)
    }

    /// Same as `build`, with caller-supplied bounds (deployments may widen
    /// or tighten the defaults via the limits config).
    pub fn build_with_bounds(
        raw: &HashMap<String, f64>,
        specs: &[FieldSpec; FEATURE_COUNT],
    ) -> Result<FeatureVector, ValidationError> {
        for key in raw.keys() {
            if !specs.iter().any(|spec| spec.name == key) {
                return Err(ValidationError::UnknownField(key.clone()));
            }
        }

        let mut values = [0.0f64; FEATURE_COUNT];
        for (slot, spec) in values.iter_mut().zip(specs.iter()) {
            let value = *raw
                .get(spec.name)
                .ok_or_else(|| ValidationError::MissingField(spec.name.to_string()))?;
            if !value.is_finite() {
                return Err(ValidationError::NotFinite {
                    field: spec.name.to_string(),
                });
            }
            if value < spec.min || value > spec.max {
                return Err(ValidationError::OutOfRange {
                    field: spec.name.to_string(),
                    value,
                    min: spec.min,
                    max: spec.max,
                });
            }
            *slot = value;
        }

        Ok(FeatureVector::from_array(values))
    }

    pub fn from_array(values: [f64; FEATURE_COUNT]) -> FeatureVector {
        FeatureVector {
            fixed_acidity: values[0],
            volatile_acidity: values[1],
            citric_acid: values[2],
            residual_sugar: values[3],
            chlorides: values[4],
            free_sulfur_dioxide: values[5],
            total_sulfur_dioxide: values[6],
            density: values[7],
            ph: values[8],
            sulphates: values[9],
            alcohol: values[10],
        }
    }

    /// Values in schema order, the only bridge into the numeric adapters.
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.fixed_acidity,
            self.volatile_acidity,
            self.citric_acid,
            self.residual_sugar,
            self.chlorides,
            self.free_sulfur_dioxide,
            self.total_sulfur_dioxide,
            self.density,
            self.ph,
            self.sulphates,
            self.alcohol,
        ]
    }

    /// The dashboard's default measurements.
    pub fn default_input() -> FeatureVector {
        FeatureVector::from_array(FIELD_SPECS.map(|spec| spec.default))
    }
}

/// Classifier class 1 is good quality, class 0 is not. The whole pipeline
/// agrees on this mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum QualityLabel {
    #[serde(rename = "GOOD")]
    #[strum(serialize = "GOOD")]
    Good,
    #[serde(rename = "NOT_GOOD")]
    #[strum(serialize = "NOT_GOOD")]
    NotGood,
}

impl QualityLabel {
    pub fn from_class(class: u8) -> QualityLabel {
        if class == 1 {
            QualityLabel::Good
        } else {
            QualityLabel::NotGood
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub label: QualityLabel,
    /// Probability mass the classifier assigned to `label`.
    pub confidence: f64,
    /// Echo of the validated input, for display and audit.
    pub input: FeatureVector,
}
