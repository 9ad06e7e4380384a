use axum::{extract::State, Json};
use chrono::Utc;
use serde::Deserialize;

use crate::error::Result;
use crate::handlers::AppState;
use crate::models::{PredictionRequest, PredictionResponse};
use crate::window::Period;

#[derive(Debug, Default, Deserialize)]
pub struct PredictOptions {
    period: Option<String>,
}

/// POST /api/predict
///
/// Builds the predictor payload from stored state (all devices plus the
/// readings inside the requested period, default `day`) and runs one
/// predictor subprocess for this request.
pub async fn predict(
    State(state): State<AppState>,
    options: Option<Json<PredictOptions>>,
) -> Result<Json<PredictionResponse>> {
    let options = options.map(|Json(o)| o).unwrap_or_default();
    let period = Period::parse(options.period.as_deref());

    let (readings, devices) = state.energy.prediction_inputs(period, Utc::now()).await?;
    let request = PredictionRequest { readings, devices };

    let response = state.predictor.predict(&request).await?;
    Ok(Json(response))
}
