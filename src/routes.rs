use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::devices::{create_device, list_devices};
use crate::handlers::energy::{
    device_readings, health, record_reading, total_usage, usage_by_type,
};
use crate::handlers::prediction::predict;
use crate::handlers::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/devices", get(list_devices).post(create_device))
        .route("/api/energy", post(record_reading))
        .route("/api/energy/device/:id", get(device_readings))
        .route("/api/energy/total", get(total_usage))
        .route("/api/energy/by-type", get(usage_by_type))
        .route("/api/predict", post(predict))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
