// src/services/sensitivity.rs
use std::collections::BTreeMap;

use super::derive::EnrichedSalesRecord;
use crate::dtos::report::{CategorySensitivity, PricePoint};

/// Unit price against quantity for every record that has both.
pub fn price_points(records: &[EnrichedSalesRecord]) -> Vec<PricePoint> {
    records
        .iter()
        .filter_map(|row| {
            let r = &row.record;
            match (r.unit_price, r.quantity) {
                (Some(unit_price), Some(quantity)) => Some(PricePoint {
                    unit_price,
                    quantity,
                    category: r.category.clone(),
                }),
                _ => None,
            }
        })
        .collect()
}

pub fn summarize_by_category(points: &[PricePoint]) -> Vec<CategorySensitivity> {
    let mut acc: BTreeMap<Option<String>, (usize, f64, i64)> = BTreeMap::new();
    for p in points {
        let entry = acc.entry(p.category.clone()).or_default();
        entry.0 += 1;
        entry.1 += p.unit_price;
        entry.2 += p.quantity;
    }

    acc.into_iter()
        .map(|(category, (n, price_sum, qty_sum))| CategorySensitivity {
            category,
            points: n,
            avg_unit_price: price_sum / n as f64,
            avg_quantity: qty_sum as f64 / n as f64,
        })
        .collect()
}
