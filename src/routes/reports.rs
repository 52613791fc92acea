// src/routes/reports.rs
use axum::{routing::get, Router};
use crate::state::AppState;
use crate::handlers::report;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports", get(report::list_reports))
        .route("/reports/{name}", get(report::get_report))
        .route("/price-sensitivity", get(report::price_sensitivity))
}
