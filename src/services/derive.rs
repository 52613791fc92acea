// src/services/derive.rs
use std::fmt;

use serde::Serialize;

use super::join::JoinedSalesRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum PriceBand {
    Low,
    Medium,
    High,
}

impl PriceBand {
    /// Boundaries fall into the upper band: 50 is Medium, 100 is High.
    pub fn classify(unit_price: f64) -> Self {
        if unit_price < 50.0 {
            PriceBand::Low
        } else if unit_price < 100.0 {
            PriceBand::Medium
        } else {
            PriceBand::High
        }
    }

    /// A missing price fails both comparisons and lands in High.
    pub fn from_unit_price(unit_price: Option<f64>) -> Self {
        match unit_price {
            Some(price) => Self::classify(price),
            None => PriceBand::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceBand::Low => "Low",
            PriceBand::Medium => "Medium",
            PriceBand::High => "High",
        }
    }
}

impl fmt::Display for PriceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Negative values mean the line sells below cost.
pub fn profit_margin(unit_price: f64, cost_price: f64) -> f64 {
    unit_price - cost_price
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedSalesRecord {
    pub record: JoinedSalesRecord,
    pub price_band: PriceBand,
    pub profit_margin: Option<f64>,
}

pub fn enrich_record(record: &JoinedSalesRecord) -> EnrichedSalesRecord {
    let price_band = PriceBand::from_unit_price(record.unit_price);
    let profit_margin = match (record.unit_price, record.cost_price) {
        (Some(unit), Some(cost)) => Some(profit_margin(unit, cost)),
        _ => None,
    };
    EnrichedSalesRecord { record: record.clone(), price_band, profit_margin }
}

/// Returns a new dataset; `joined` is left untouched.
pub fn enrich(joined: &[JoinedSalesRecord]) -> Vec<EnrichedSalesRecord> {
    joined.iter().map(enrich_record).collect()
}
