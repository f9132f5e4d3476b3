use fare_predictor::{AppState, CategoryEncoder, FareModel};

/// Fitted pair mirroring `artifacts/api/`: distance plus one-hot Traffic and
/// Time_of_Day columns.
pub fn api_state() -> AppState {
    let encoder: CategoryEncoder = serde_json::from_value(serde_json::json!({
        "columns": [
            { "name": "Traffic", "categories": ["High", "Low", "Medium"] },
            { "name": "Time_of_Day", "categories": ["Afternoon", "Evening", "Morning", "Night"] }
        ],
        "handle_unknown": "error"
    }))
    .unwrap();

    let model: FareModel = serde_json::from_value(serde_json::json!({
        "feature_names": [
            "distance",
            "Traffic_High", "Traffic_Low", "Traffic_Medium",
            "Time_of_Day_Afternoon", "Time_of_Day_Evening",
            "Time_of_Day_Morning", "Time_of_Day_Night"
        ],
        "weights": [1.35, 3.1, 0.0, 1.4, 0.6, 2.2, 0.4, 1.1],
        "intercept": 2.5
    }))
    .unwrap();

    AppState::new(model, encoder)
}

/// Fitted pair mirroring `artifacts/form/`: the api pair plus a Type_of_Car
/// column.
pub fn form_state() -> AppState {
    let encoder: CategoryEncoder = serde_json::from_value(serde_json::json!({
        "columns": [
            { "name": "Traffic", "categories": ["High", "Low", "Medium"] },
            { "name": "Time_of_Day", "categories": ["Afternoon", "Evening", "Morning", "Night"] },
            { "name": "Type_of_Car", "categories": ["Hatchback", "Luxury", "SUV", "Sedan"] }
        ],
        "handle_unknown": "error"
    }))
    .unwrap();

    let model: FareModel = serde_json::from_value(serde_json::json!({
        "feature_names": [
            "distance",
            "Traffic_High", "Traffic_Low", "Traffic_Medium",
            "Time_of_Day_Afternoon", "Time_of_Day_Evening",
            "Time_of_Day_Morning", "Time_of_Day_Night",
            "Type_of_Car_Hatchback", "Type_of_Car_Luxury",
            "Type_of_Car_SUV", "Type_of_Car_Sedan"
        ],
        "weights": [1.35, 3.1, 0.0, 1.4, 0.6, 2.2, 0.4, 1.1, -0.4, 6.5, 1.8, 0.0],
        "intercept": 2.5
    }))
    .unwrap();

    AppState::new(model, encoder)
}
