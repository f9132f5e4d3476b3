use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

use crate::error::TransformError;

/// One categorical column with its fitted category list. Category order is
/// the fitted order and determines both indicator position and output name
/// order, so it is preserved verbatim from the artifact.
#[derive(Debug, Clone, Deserialize)]
pub struct EncoderColumn {
    pub name: String,
    pub categories: Vec<String>,
}

/// What the fitted encoder does with a category it never saw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleUnknown {
    /// Reject the row with a transform error.
    #[default]
    Error,
    /// Emit an all-zero indicator row for that column.
    Ignore,
}

/// Pre-fitted one-hot encoder, deserialized once at startup and read-only
/// afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryEncoder {
    pub columns: Vec<EncoderColumn>,
    #[serde(default)]
    pub handle_unknown: HandleUnknown,
}

impl CategoryEncoder {
    pub fn load(path: &Path) -> Result<Self> {
        let txt = fs::read_to_string(path)
            .with_context(|| format!("failed to read encoder artifact at {}", path.display()))?;
        let enc: CategoryEncoder = serde_json::from_str(&txt)
            .with_context(|| format!("failed to parse encoder artifact {}", path.display()))?;

        if enc.columns.is_empty() {
            bail!("encoder artifact {} declares no columns", path.display());
        }
        for col in &enc.columns {
            if col.categories.is_empty() {
                bail!("encoder column {:?} has no fitted categories", col.name);
            }
        }
        Ok(enc)
    }

    /// Input column names, in declaration order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Output indicator names, `<column>_<category>`, in column then fitted
    /// category order. This is the authoritative labeling for assembled rows.
    pub fn feature_names_out(&self) -> Vec<String> {
        self.columns
            .iter()
            .flat_map(|c| {
                c.categories
                    .iter()
                    .map(move |cat| format!("{}_{}", c.name, cat))
            })
            .collect()
    }

    /// Number of indicator columns produced per row.
    pub fn out_dim(&self) -> usize {
        self.columns.iter().map(|c| c.categories.len()).sum()
    }

    /// One-hot encode a single row. `values` must align with `columns`
    /// (the assembler resolves them by name before calling in).
    pub fn transform(&self, values: &[&str]) -> Result<Vec<f64>, TransformError> {
        debug_assert_eq!(values.len(), self.columns.len());

        let mut out = Vec::with_capacity(self.out_dim());
        for (col, value) in self.columns.iter().zip(values) {
            let hit = col.categories.iter().position(|c| c.as_str() == *value);
            if hit.is_none() && self.handle_unknown == HandleUnknown::Error {
                return Err(TransformError::UnknownCategory {
                    column: col.name.clone(),
                    value: (*value).to_string(),
                });
            }
            for i in 0..col.categories.len() {
                out.push(if Some(i) == hit { 1.0 } else { 0.0 });
            }
        }
        Ok(out)
    }
}
