use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

use crate::error::InferenceError;
use crate::features::FeatureRow;

/// Pre-fitted linear fare model. `feature_names` is the authoritative input
/// order the model was trained on; `predict` refuses any row that does not
/// reproduce it exactly.
#[derive(Debug, Clone, Deserialize)]
pub struct FareModel {
    pub feature_names: Vec<String>,
    pub weights: Vec<f64>,
    pub intercept: f64,
}

impl FareModel {
    pub fn load(path: &Path) -> Result<Self> {
        let txt = fs::read_to_string(path)
            .with_context(|| format!("failed to read model artifact at {}", path.display()))?;
        let model: FareModel = serde_json::from_str(&txt)
            .with_context(|| format!("failed to parse model artifact {}", path.display()))?;

        if model.feature_names.is_empty() {
            bail!("model artifact {} declares no features", path.display());
        }
        if model.weights.len() != model.feature_names.len() {
            bail!(
                "model artifact {} arity mismatch: {} weights for {} feature names",
                path.display(),
                model.weights.len(),
                model.feature_names.len()
            );
        }
        Ok(model)
    }

    pub fn in_dim(&self) -> usize {
        self.feature_names.len()
    }

    /// Predict a fare for one feature row. The row must carry the model's
    /// columns in the model's order.
    pub fn predict(&self, row: &FeatureRow) -> Result<f64, InferenceError> {
        if row.values.len() != self.feature_names.len() {
            return Err(InferenceError::LengthMismatch {
                got: row.values.len(),
                expected: self.feature_names.len(),
            });
        }
        for (index, (got, expected)) in row.names.iter().zip(&self.feature_names).enumerate() {
            if got != expected {
                return Err(InferenceError::ColumnMismatch {
                    index,
                    got: got.clone(),
                    expected: expected.clone(),
                });
            }
        }

        let dot: f64 = row
            .values
            .iter()
            .zip(&self.weights)
            .map(|(x, w)| x * w)
            .sum();
        Ok(self.intercept + dot)
    }
}
