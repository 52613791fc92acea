// src/services/aggregate.rs
use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use super::derive::EnrichedSalesRecord;
use crate::dtos::report::{AggregateReport, AggregateRow};

/// Columns a report can be grouped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    ChannelName,
    CampaignName,
    ProductName,
    PriceBand,
    Category,
    Size,
    Color,
}

impl GroupKey {
    pub fn column(&self) -> &'static str {
        match self {
            GroupKey::ChannelName => "channel_name",
            GroupKey::CampaignName => "campaign_name",
            GroupKey::ProductName => "product_name",
            GroupKey::PriceBand => "price_band",
            GroupKey::Category => "category",
            GroupKey::Size => "size",
            GroupKey::Color => "color",
        }
    }

    pub fn value(&self, row: &EnrichedSalesRecord) -> Option<String> {
        let r = &row.record;
        match self {
            GroupKey::ChannelName => r.channel_name.clone(),
            GroupKey::CampaignName => r.campaign_name.clone(),
            GroupKey::ProductName => r.product_name.clone(),
            GroupKey::PriceBand => Some(row.price_band.as_str().to_string()),
            GroupKey::Category => r.category.clone(),
            GroupKey::Size => r.size.clone(),
            GroupKey::Color => r.color.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    TotalRevenue,
    TotalQuantity,
    AvgOrderValue,
    AvgMargin,
}

impl Metric {
    pub fn column(&self) -> &'static str {
        match self {
            Metric::TotalRevenue => "total_revenue",
            Metric::TotalQuantity => "total_quantity",
            Metric::AvgOrderValue => "avg_order_value",
            Metric::AvgMargin => "avg_margin",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AggregationSpec {
    pub name: &'static str,
    pub title: &'static str,
    pub group_key: GroupKey,
    pub metrics: Vec<Metric>,
    pub sort_by: Metric,
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Clone, Copy)]
struct GroupTotals {
    revenue: f64,
    quantity: i64,
    priced_rows: usize,
    margin_sum: f64,
    margin_rows: usize,
}

impl GroupTotals {
    // NULL measures count as zero in sums and are skipped by means.
    fn add(&mut self, row: &EnrichedSalesRecord) {
        if let Some(total) = row.record.item_total {
            self.revenue += total;
            self.priced_rows += 1;
        }
        self.quantity += row.record.quantity.unwrap_or(0);
        if let Some(m) = row.profit_margin {
            self.margin_sum += m;
            self.margin_rows += 1;
        }
    }

    fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::TotalRevenue => Some(self.revenue),
            Metric::TotalQuantity => Some(self.quantity as f64),
            Metric::AvgOrderValue => {
                (self.priced_rows > 0).then(|| self.revenue / self.priced_rows as f64)
            }
            Metric::AvgMargin => {
                (self.margin_rows > 0).then(|| self.margin_sum / self.margin_rows as f64)
            }
        }
    }
}

// Descending; groups without a value sink to the bottom.
fn descending(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Group, reduce, sort descending by `spec.sort_by`, then truncate.
///
/// Ties keep group-name order (absent group first) because the sort is stable
/// over an ordered map.
pub fn aggregate(records: &[EnrichedSalesRecord], spec: &AggregationSpec) -> AggregateReport {
    let mut groups: BTreeMap<Option<String>, GroupTotals> = BTreeMap::new();
    for row in records {
        groups.entry(spec.group_key.value(row)).or_default().add(row);
    }

    let mut ordered: Vec<(Option<String>, GroupTotals)> = groups.into_iter().collect();
    ordered.sort_by(|(_, a), (_, b)| descending(a.metric(spec.sort_by), b.metric(spec.sort_by)));
    if let Some(limit) = spec.limit {
        ordered.truncate(limit);
    }

    let wants = |m: Metric| spec.metrics.contains(&m);
    let rows = ordered
        .into_iter()
        .map(|(group, totals)| AggregateRow {
            group,
            total_revenue: wants(Metric::TotalRevenue).then_some(totals.revenue),
            total_quantity: wants(Metric::TotalQuantity).then_some(totals.quantity),
            avg_order_value: if wants(Metric::AvgOrderValue) { totals.metric(Metric::AvgOrderValue) } else { None },
            avg_margin: if wants(Metric::AvgMargin) { totals.metric(Metric::AvgMargin) } else { None },
        })
        .collect();

    AggregateReport {
        name: spec.name.to_string(),
        title: spec.title.to_string(),
        group_by: spec.group_key,
        metrics: spec.metrics.clone(),
        sorted_by: spec.sort_by,
        limit: spec.limit,
        rows,
    }
}

/// The eight standard sales reports.
pub fn standard_reports(top_n: usize) -> Vec<AggregationSpec> {
    use Metric::*;

    vec![
        AggregationSpec {
            name: "channel_performance",
            title: "Channel Performance",
            group_key: GroupKey::ChannelName,
            metrics: vec![TotalRevenue, TotalQuantity, AvgOrderValue],
            sort_by: TotalRevenue,
            limit: None,
        },
        AggregationSpec {
            name: "campaign_performance",
            title: "Campaign Performance",
            group_key: GroupKey::CampaignName,
            metrics: vec![TotalRevenue, TotalQuantity],
            sort_by: TotalRevenue,
            limit: None,
        },
        AggregationSpec {
            name: "top_products_by_revenue",
            title: "Top Products by Revenue",
            group_key: GroupKey::ProductName,
            metrics: vec![TotalRevenue, TotalQuantity],
            sort_by: TotalRevenue,
            limit: Some(top_n),
        },
        AggregationSpec {
            name: "top_products_by_quantity",
            title: "Top Products by Quantity",
            group_key: GroupKey::ProductName,
            metrics: vec![TotalRevenue, TotalQuantity],
            sort_by: TotalQuantity,
            limit: Some(top_n),
        },
        AggregationSpec {
            name: "price_band_performance",
            title: "Price Band & Profitability",
            group_key: GroupKey::PriceBand,
            metrics: vec![AvgMargin, TotalRevenue, TotalQuantity],
            sort_by: TotalRevenue,
            limit: None,
        },
        AggregationSpec {
            name: "category_performance",
            title: "Category Performance",
            group_key: GroupKey::Category,
            metrics: vec![TotalRevenue],
            sort_by: TotalRevenue,
            limit: None,
        },
        AggregationSpec {
            name: "size_performance",
            title: "Size Performance",
            group_key: GroupKey::Size,
            metrics: vec![TotalRevenue, TotalQuantity],
            sort_by: TotalRevenue,
            limit: None,
        },
        AggregationSpec {
            name: "color_performance",
            title: "Color Performance",
            group_key: GroupKey::Color,
            metrics: vec![TotalRevenue, TotalQuantity],
            sort_by: TotalRevenue,
            limit: None,
        },
    ]
}
