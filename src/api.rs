//! JSON frontend: `GET /` liveness and `POST /predict`.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};

use crate::error::{PredictError, ValidationError};
use crate::features::FareRecord;
use crate::pipeline::{predict_fare, round_fare, AppState};

pub const LIVENESS_MESSAGE: &str = "Fare Prediction API is Running!";

/// Required JSON fields, checked in this order; the first missing one is the
/// one reported.
const REQUIRED_FIELDS: [&str; 3] = ["distance", "traffic", "time_of_day"];

/// Decode and validate a raw JSON body into a record. Only the request shape
/// is checked here; category membership is the encoder's concern.
pub fn decode_request(body: &[u8]) -> Result<FareRecord, ValidationError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| ValidationError::BodyNotJson)?;
    let map = match &value {
        Value::Object(map) if !map.is_empty() => map,
        _ => return Err(ValidationError::BodyNotJson),
    };

    for field in REQUIRED_FIELDS {
        if !map.contains_key(field) {
            return Err(ValidationError::MissingField(field.to_string()));
        }
    }

    let distance = match &map["distance"] {
        Value::Number(n) => n.as_f64().ok_or(ValidationError::InvalidDistance)?,
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidDistance)?,
        _ => return Err(ValidationError::InvalidDistance),
    };

    // Categorical values pass through as-is; a non-string ends up rejected by
    // the encoder as an unknown category rather than failing validation.
    let label = |v: &Value| match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    Ok(FareRecord::new(
        distance,
        vec![
            ("Traffic".to_string(), label(&map["traffic"])),
            ("Time_of_Day".to_string(), label(&map["time_of_day"])),
        ],
    ))
}

async fn home() -> Json<Value> {
    Json(json!({ "message": LIVENESS_MESSAGE }))
}

async fn predict(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let fail = |status: StatusCode, e: &PredictError| {
        tracing::warn!("predict failed: {}", e);
        (status, Json(json!({ "error": e.to_string() })))
    };

    let record = decode_request(&body)
        .map_err(|e| fail(StatusCode::BAD_REQUEST, &PredictError::Validation(e)))?;

    let fare = predict_fare(&state, &record).map_err(|e| {
        let status = if e.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        fail(status, &e)
    })?;

    Ok(Json(json!({ "estimated_fare": round_fare(fare) })))
}

/// JSON API router. Cross-origin requests are allowed from anywhere so
/// browser and mobile clients can call the endpoint directly.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(home))
        .route("/predict", post(predict))
        .layer(cors)
        .with_state(state)
}
