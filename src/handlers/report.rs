// src/handlers/report.rs
use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{instrument, warn};

use crate::dtos::report::{AggregateReport, AnalyticsSnapshot, PriceSensitivityResponse};
use crate::error::AppError;
use crate::state::AppState;

// GET /reports - Full snapshot
#[instrument(skip(state))]
pub async fn list_reports(State(state): State<AppState>) -> Json<AnalyticsSnapshot> {
    Json(state.snapshot.as_ref().clone())
}

// GET /reports/{name} - One aggregate report
#[instrument(skip(state))]
pub async fn get_report(
    Path(name): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<AggregateReport>, AppError> {
    match state.snapshot.report(&name) {
        Some(report) => Ok(Json(report.clone())),
        None => {
            warn!(%name, "Unknown report requested");
            Err(AppError::not_found(format!("Report '{name}' not found")))
        }
    }
}

// GET /price-sensitivity - Scatter data and per-category summary
#[instrument(skip(state))]
pub async fn price_sensitivity(State(state): State<AppState>) -> Json<PriceSensitivityResponse> {
    Json(state.snapshot.price_sensitivity.clone())
}
