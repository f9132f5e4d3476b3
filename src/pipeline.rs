use anyhow::{Context, Result};
use std::{path::Path, sync::Arc};

use crate::encoder::CategoryEncoder;
use crate::error::PredictError;
use crate::features::{assemble, FareRecord};
use crate::model::FareModel;

/// Read-only artifact pair shared by every request handler. Loaded once at
/// startup; cloning is cheap (two Arc bumps).
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<FareModel>,
    pub encoder: Arc<CategoryEncoder>,
}

impl AppState {
    /// Load both artifacts. Any failure here is fatal to the process: the
    /// service has no meaningful behavior without a fitted pair.
    pub fn load(model_path: &Path, encoder_path: &Path) -> Result<Self> {
        let model = FareModel::load(model_path)?;
        let encoder = CategoryEncoder::load(encoder_path)?;
        Ok(Self {
            model: Arc::new(model),
            encoder: Arc::new(encoder),
        })
    }

    pub fn new(model: FareModel, encoder: CategoryEncoder) -> Self {
        Self {
            model: Arc::new(model),
            encoder: Arc::new(encoder),
        }
    }

    /// Startup probe: run one dummy prediction so a mismatched artifact pair
    /// fails the process at boot instead of on the first request.
    pub fn warmup(&self) -> Result<f64> {
        let categoricals = self
            .encoder
            .columns
            .iter()
            .map(|c| (c.name.clone(), c.categories[0].clone()))
            .collect();
        let record = FareRecord::new(0.0, categoricals);
        predict_fare(self, &record).context("warmup prediction failed; artifact pair mismatch?")
    }
}

/// The shared pipeline behind both frontends: assemble the feature row and
/// run inference. Validation happens upstream in each frontend's decoder.
pub fn predict_fare(state: &AppState, record: &FareRecord) -> Result<f64, PredictError> {
    let row = assemble(record, &state.encoder)?;

    if tracing::enabled!(tracing::Level::DEBUG) {
        let nz = row.values.iter().filter(|v| **v != 0.0).count();
        let sample: Vec<String> = row
            .names
            .iter()
            .zip(&row.values)
            .take(6)
            .map(|(n, v)| format!("{}={:.3}", n, v))
            .collect();
        tracing::debug!(
            "assembled row: dim={} nonzero={} sample=[{}]",
            row.values.len(),
            nz,
            sample.join(", ")
        );
    }

    let fare = state.model.predict(&row)?;
    Ok(fare)
}

/// Presentation rounding, two decimal places.
pub fn round_fare(fare: f64) -> f64 {
    (fare * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        let encoder: CategoryEncoder = serde_json::from_value(serde_json::json!({
            "columns": [ { "name": "Traffic", "categories": ["High", "Low"] } ]
        }))
        .unwrap();
        let model: FareModel = serde_json::from_value(serde_json::json!({
            "feature_names": ["distance", "Traffic_High", "Traffic_Low"],
            "weights": [1.25, 2.0, 0.0],
            "intercept": 3.0
        }))
        .unwrap();
        AppState::new(model, encoder)
    }

    fn record(distance: f64, traffic: &str) -> FareRecord {
        FareRecord::new(distance, vec![("Traffic".into(), traffic.into())])
    }

    #[test]
    fn prediction_is_deterministic() {
        let state = state();
        let a = predict_fare(&state, &record(4.0, "High")).unwrap();
        let b = predict_fare(&state, &record(4.0, "High")).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, 3.0 + 4.0 * 1.25 + 2.0);
    }

    #[test]
    fn transform_failures_keep_their_kind() {
        let state = state();
        let err = predict_fare(&state, &record(4.0, "Gridlock")).unwrap_err();
        assert!(matches!(err, PredictError::Transform(_)));
        assert!(!err.is_client_error());
    }

    #[test]
    fn inference_failures_keep_their_kind() {
        // Model trained on a different column set than the encoder produces.
        let encoder: CategoryEncoder = serde_json::from_value(serde_json::json!({
            "columns": [ { "name": "Traffic", "categories": ["High", "Low", "Medium"] } ]
        }))
        .unwrap();
        let model: FareModel = serde_json::from_value(serde_json::json!({
            "feature_names": ["distance", "Traffic_High", "Traffic_Low"],
            "weights": [1.0, 1.0, 1.0],
            "intercept": 0.0
        }))
        .unwrap();
        let state = AppState::new(model, encoder);

        let err = predict_fare(&state, &record(1.0, "High")).unwrap_err();
        assert!(matches!(err, PredictError::Inference(_)));
        assert!(state.warmup().is_err());
    }

    #[test]
    fn warmup_succeeds_on_matched_pair() {
        assert!(state().warmup().is_ok());
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round_fare(12.345), 12.35);
        assert_eq!(round_fare(12.344), 12.34);
        assert_eq!(round_fare(10.0), 10.0);
    }

    #[test]
    fn loads_artifact_pair_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let model_path = dir.path().join("fare_model.json");
        let encoder_path = dir.path().join("encoder.json");
        std::fs::write(
            &model_path,
            r#"{ "feature_names": ["distance", "Traffic_High"], "weights": [1.0, 2.0], "intercept": 0.5 }"#,
        )
        .unwrap();
        std::fs::write(
            &encoder_path,
            r#"{ "columns": [ { "name": "Traffic", "categories": ["High"] } ] }"#,
        )
        .unwrap();

        let state = AppState::load(&model_path, &encoder_path).unwrap();
        assert_eq!(state.warmup().unwrap(), 0.5 + 2.0);

        // Missing artifact refuses to load.
        assert!(AppState::load(&model_path, &dir.path().join("nope.json")).is_err());
    }
}
