// src/services/pipeline.rs
use chrono::Utc;
use tracing::info;

use super::aggregate::{aggregate, standard_reports};
use super::derive::enrich;
use super::join::left_join;
use super::sensitivity::{price_points, summarize_by_category};
use crate::database::SourceTables;
use crate::dtos::report::{AnalyticsSnapshot, PriceSensitivityResponse};
use crate::error::AppError;

/// join → derive → aggregate over already-loaded tables.
pub fn run(source: &SourceTables, top_n: usize) -> Result<AnalyticsSnapshot, AppError> {
    let joined = left_join(&source.sales, &source.products, &source.channels, &source.campaigns)?;
    debug_assert_eq!(joined.len(), source.sales.len());
    info!(rows = joined.len(), "Joined sales with dimensions");

    let enriched = enrich(&joined);

    let reports: Vec<_> = standard_reports(top_n)
        .iter()
        .map(|spec| aggregate(&enriched, spec))
        .collect();
    info!(reports = reports.len(), "Computed aggregations");

    let points = price_points(&enriched);
    let by_category = summarize_by_category(&points);

    Ok(AnalyticsSnapshot {
        generated_at: Utc::now(),
        sales_rows: joined.len(),
        reports,
        price_sensitivity: PriceSensitivityResponse { points, by_category },
    })
}
