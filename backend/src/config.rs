use std::collections::HashMap;
use std::env;

use serde::Deserialize;
use shared::{FEATURE_COUNT, FIELD_SPECS, FieldSpec};

use crate::error::ConfigError;

/// Service configuration from the environment (a `.env` file is honored in
/// development). Artifact paths default to the demo artifacts shipped in
/// the repo.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub scaler_path: String,
    pub model_path: String,
    pub limits_path: Option<String>,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> AppConfig {
        AppConfig {
            scaler_path: env::var("SCALER_PATH")
                .unwrap_or_else(|_| "artifacts/scaler.json".to_string()),
            model_path: env::var("MODEL_PATH")
                .unwrap_or_else(|_| "artifacts/classifier.json".to_string()),
            limits_path: env::var("LIMITS_PATH").ok(),
            port: env::var("PORT")
                .ok()
                .and_then(|value| value.parse::<u16>().ok())
                .unwrap_or(8081),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

#[derive(Debug, Deserialize)]
struct LimitOverride {
    min: f64,
    max: f64,
}

/// Loads per-field validation bounds from a YAML file of
/// `field_name: { min, max }` entries layered over the built-in defaults.
pub fn load_limits(path: &str) -> Result<[FieldSpec; FEATURE_COUNT], ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::LimitsUnavailable {
        path: path.to_string(),
        source,
    })?;
    let overrides: HashMap<String, LimitOverride> =
        serde_yaml::from_str(&text).map_err(|source| ConfigError::LimitsMalformed {
            path: path.to_string(),
            source,
        })?;
    apply_overrides(overrides)
}

fn apply_overrides(
    overrides: HashMap<String, LimitOverride>,
) -> Result<[FieldSpec; FEATURE_COUNT], ConfigError> {
    let mut specs = FIELD_SPECS;
    for (name, limit) in &overrides {
        let spec = specs
            .iter_mut()
            .find(|spec| spec.name == name)
            .ok_or_else(|| ConfigError::InvalidLimits(format!("unknown field '{name}'")))?;
        if !limit.min.is_finite() || !limit.max.is_finite() || limit.min >= limit.max {
            return Err(ConfigError::InvalidLimits(format!(
                "field '{name}' has an empty or non-finite range [{}, {}]",
                limit.min, limit.max
            )));
        }
        spec.min = limit.min;
        spec.max = limit.max;
    }
    Ok(specs)
}
