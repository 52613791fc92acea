// src/dtos/report.rs
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::services::aggregate::{GroupKey, Metric};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRow {
    /// `None` collects every record whose grouping attribute is absent.
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_revenue: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_order_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_margin: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AggregateReport {
    pub name: String,
    pub title: String,
    pub group_by: GroupKey,
    pub metrics: Vec<Metric>,
    pub sorted_by: Metric,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    pub rows: Vec<AggregateRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePoint {
    pub unit_price: f64,
    pub quantity: i64,
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySensitivity {
    pub category: Option<String>,
    pub points: usize,
    pub avg_unit_price: f64,
    pub avg_quantity: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceSensitivityResponse {
    pub points: Vec<PricePoint>,
    pub by_category: Vec<CategorySensitivity>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSnapshot {
    pub generated_at: DateTime<Utc>,
    pub sales_rows: usize,
    pub reports: Vec<AggregateReport>,
    pub price_sensitivity: PriceSensitivityResponse,
}

impl AnalyticsSnapshot {
    pub fn report(&self, name: &str) -> Option<&AggregateReport> {
        self.reports.iter().find(|r| r.name == name)
    }
}
