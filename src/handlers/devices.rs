use axum::{extract::State, http::StatusCode, Json};

use crate::error::Result;
use crate::handlers::AppState;
use crate::models::{Device, NewDevice};

/// GET /api/devices
pub async fn list_devices(State(state): State<AppState>) -> Result<Json<Vec<Device>>> {
    let devices = state.energy.list_devices().await?;
    Ok(Json(devices))
}

/// POST /api/devices
pub async fn create_device(
    State(state): State<AppState>,
    Json(new): Json<NewDevice>,
) -> Result<(StatusCode, Json<Device>)> {
    let device = state.energy.register_device(new).await?;
    Ok((StatusCode::CREATED, Json(device)))
}
