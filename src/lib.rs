//! Fare prediction service library.
//!
//! Two pre-fitted artifacts — a one-hot category encoder and a linear fare
//! model — are loaded at startup and served behind two HTTP frontends: a
//! JSON API (`fare_api`) and a server-rendered form (`fare_form`). Both run
//! the same pipeline: validate → assemble features → infer → format.

pub mod api;
pub mod encoder;
pub mod error;
pub mod features;
pub mod form;
pub mod model;
pub mod pipeline;

pub use encoder::CategoryEncoder;
pub use error::{InferenceError, PredictError, TransformError, ValidationError};
pub use features::{FareRecord, FeatureRow};
pub use model::FareModel;
pub use pipeline::AppState;
