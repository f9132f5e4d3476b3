use thiserror::Error;

/// Request-shape errors. Messages are part of the JSON API contract and are
/// returned to the client verbatim with a 400 status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid input. JSON required")]
    BodyNotJson,
    #[error("Missing field: {0}")]
    MissingField(String),
    #[error("Invalid distance value")]
    InvalidDistance,
}

/// Failures while turning a record into encoder indicator columns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("unknown category {value:?} for column {column:?}")]
    UnknownCategory { column: String, value: String },
    #[error("missing categorical column {0:?}")]
    MissingColumn(String),
}

/// Failures inside the model itself. The feature row is order-sensitive, so
/// any name or arity drift is rejected rather than silently mis-predicted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InferenceError {
    #[error("feature length mismatch: got {got}, expected {expected}")]
    LengthMismatch { got: usize, expected: usize },
    #[error("feature column mismatch at {index}: got {got:?}, expected {expected:?}")]
    ColumnMismatch {
        index: usize,
        got: String,
        expected: String,
    },
}

/// One error space for the whole predict pipeline, so callers can branch on
/// the stage that failed instead of parsing message strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    Transform(#[from] TransformError),
    #[error("{0}")]
    Inference(#[from] InferenceError),
}

impl PredictError {
    /// True for errors the client caused (bad request shape).
    pub fn is_client_error(&self) -> bool {
        matches!(self, PredictError::Validation(_))
    }
}
