use crate::encoder::CategoryEncoder;
use crate::error::TransformError;

/// A validated fare request: the numeric distance plus the categorical
/// fields as `(column, value)` pairs. Which columns are present depends on
/// the frontend (the form variant carries an extra `Type_of_Car`).
#[derive(Debug, Clone, PartialEq)]
pub struct FareRecord {
    pub distance: f64,
    pub categoricals: Vec<(String, String)>,
}

impl FareRecord {
    pub fn new(distance: f64, categoricals: Vec<(String, String)>) -> Self {
        Self {
            distance,
            categoricals,
        }
    }

    fn value_for(&self, column: &str) -> Option<&str> {
        self.categoricals
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }
}

/// One named, ordered model input row.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub names: Vec<String>,
    pub values: Vec<f64>,
}

/// Assemble the model input: `[distance]` followed by the encoder's one-hot
/// indicator columns, labeled and ordered by the encoder itself. The record
/// may list its categoricals in any order; the encoder's column order wins.
pub fn assemble(
    record: &FareRecord,
    encoder: &CategoryEncoder,
) -> Result<FeatureRow, TransformError> {
    let mut values = Vec::with_capacity(encoder.columns.len());
    for name in encoder.column_names() {
        let value = record
            .value_for(name)
            .ok_or_else(|| TransformError::MissingColumn(name.to_string()))?;
        values.push(value);
    }

    let indicators = encoder.transform(&values)?;

    let mut names = Vec::with_capacity(1 + indicators.len());
    names.push("distance".to_string());
    names.extend(encoder.feature_names_out());

    let mut row = Vec::with_capacity(1 + indicators.len());
    row.push(record.distance);
    row.extend(indicators);

    Ok(FeatureRow { names, values: row })
}
