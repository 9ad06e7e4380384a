use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::Result;
use crate::handlers::AppState;
use crate::models::{CategoryUsage, EnergyReading, ReadingSubmission, UsageTotals};
use crate::window::Period;

#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    period: Option<String>,
}

impl PeriodQuery {
    fn period(&self) -> Period {
        Period::parse(self.period.as_deref())
    }
}

/// POST /api/energy
pub async fn record_reading(
    State(state): State<AppState>,
    Json(submission): Json<ReadingSubmission>,
) -> Result<(StatusCode, Json<EnergyReading>)> {
    let reading = state.energy.record_reading(submission).await?;
    Ok((StatusCode::CREATED, Json(reading)))
}

/// GET /api/energy/device/:id?period=
pub async fn device_readings(
    State(state): State<AppState>,
    Path(device_id): Path<Uuid>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<Vec<EnergyReading>>> {
    let readings = state
        .energy
        .device_readings(device_id, query.period(), Utc::now())
        .await?;
    Ok(Json(readings))
}

/// GET /api/energy/total?period=
pub async fn total_usage(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<UsageTotals>> {
    let totals = state
        .energy
        .usage_totals(query.period(), Utc::now())
        .await?;
    Ok(Json(totals))
}

/// GET /api/energy/by-type?period=
pub async fn usage_by_type(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<Vec<CategoryUsage>>> {
    let rows = state
        .energy
        .usage_by_category(query.period(), Utc::now())
        .await?;
    Ok(Json(rows))
}

pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}
