//! Server-rendered frontend: an input form on `GET /`, a rendered result on
//! `POST /`. Unlike the JSON API this variant also requires a car type, and
//! every failure collapses into one generic on-page message.

use axum::{
    extract::{rejection::FormRejection, State},
    response::Html,
    routing::get,
    Form, Router,
};
use std::collections::HashMap;

use crate::error::ValidationError;
use crate::features::FareRecord;
use crate::pipeline::{predict_fare, AppState};

/// Car types offered by the form, matching the fitted dataset.
pub const CAR_TYPES: [&str; 4] = ["Sedan", "SUV", "Hatchback", "Luxury"];

pub const GENERIC_ERROR: &str = "Error in prediction. Check inputs.";

const REQUIRED_FIELDS: [&str; 4] = ["distance", "traffic", "time_of_day", "car_type"];

/// Decode submitted form fields into a record. The caller renders any error
/// as the generic message; the typed kind only feeds the logs.
pub fn decode_form(fields: &HashMap<String, String>) -> Result<FareRecord, ValidationError> {
    for field in REQUIRED_FIELDS {
        if !fields.contains_key(field) {
            return Err(ValidationError::MissingField(field.to_string()));
        }
    }

    let distance = fields["distance"]
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidDistance)?;

    Ok(FareRecord::new(
        distance,
        vec![
            ("Traffic".to_string(), fields["traffic"].clone()),
            ("Time_of_Day".to_string(), fields["time_of_day"].clone()),
            ("Type_of_Car".to_string(), fields["car_type"].clone()),
        ],
    ))
}

pub fn render_page(prediction_text: Option<&str>) -> String {
    let options: String = CAR_TYPES
        .iter()
        .map(|t| format!("<option value=\"{t}\">{t}</option>"))
        .collect();

    let result = prediction_text
        .map(|text| format!("<p class=\"result\">{text}</p>"))
        .unwrap_or_default();

    format!(
        "<!doctype html>\n\
         <html>\n\
         <head><title>Fare Prediction</title></head>\n\
         <body>\n\
         <h1>Fare Prediction</h1>\n\
         <form method=\"post\" action=\"/\">\n\
           <label>Distance (km) <input type=\"text\" name=\"distance\"></label>\n\
           <label>Traffic <input type=\"text\" name=\"traffic\"></label>\n\
           <label>Time of day <input type=\"text\" name=\"time_of_day\"></label>\n\
           <label>Car type <select name=\"car_type\">{options}</select></label>\n\
           <button type=\"submit\">Predict Fare</button>\n\
         </form>\n\
         {result}\n\
         </body>\n\
         </html>\n"
    )
}

async fn page() -> Html<String> {
    Html(render_page(None))
}

async fn submit(
    State(state): State<AppState>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Html<String> {
    let outcome = match form {
        Ok(Form(fields)) => decode_form(&fields)
            .map_err(|e| e.to_string())
            .and_then(|record| {
                predict_fare(&state, &record).map_err(|e| e.to_string())
            }),
        Err(rejection) => Err(rejection.to_string()),
    };

    let text = match outcome {
        Ok(fare) => format!("Estimated Fare: $ {:.2}", fare),
        Err(cause) => {
            tracing::warn!("form prediction failed: {}", cause);
            GENERIC_ERROR.to_string()
        }
    };
    Html(render_page(Some(&text)))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(page).post(submit))
        .with_state(state)
}
