// src/services/console.rs
use std::fmt::Write;

use crate::dtos::report::{AggregateReport, AggregateRow, CategorySensitivity};
use crate::services::aggregate::Metric;

const NONE_LABEL: &str = "(none)";

fn cell(row: &AggregateRow, metric: Metric) -> String {
    let money = |v: Option<f64>| v.map(|x| format!("{x:.2}")).unwrap_or_else(|| "-".to_string());
    match metric {
        Metric::TotalRevenue => money(row.total_revenue),
        Metric::TotalQuantity => row
            .total_quantity
            .map(|q| q.to_string())
            .unwrap_or_else(|| "-".to_string()),
        Metric::AvgOrderValue => money(row.avg_order_value),
        Metric::AvgMargin => money(row.avg_margin),
    }
}

fn layout(headers: Vec<String>, body: Vec<Vec<String>>, title: &str) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for line in &body {
        for (i, c) in line.iter().enumerate() {
            widths[i] = widths[i].max(c.chars().count());
        }
    }

    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    let mut push_line = |cells: &[String]| {
        let mut line = String::new();
        for (i, c) in cells.iter().enumerate() {
            if i > 0 {
                line.push_str("  ");
            }
            // first column is the label, the rest are numbers
            if i == 0 {
                let _ = write!(line, "{c:<w$}", w = widths[i]);
            } else {
                let _ = write!(line, "{c:>w$}", w = widths[i]);
            }
        }
        let _ = writeln!(out, "{}", line.trim_end());
    };

    push_line(&headers);
    for line in &body {
        push_line(line);
    }
    out
}

pub fn render_table(report: &AggregateReport) -> String {
    let mut headers = vec![report.group_by.column().to_string()];
    headers.extend(report.metrics.iter().map(|m| m.column().to_string()));

    let body = report
        .rows
        .iter()
        .map(|row| {
            let mut line = vec![row.group.clone().unwrap_or_else(|| NONE_LABEL.to_string())];
            line.extend(report.metrics.iter().map(|m| cell(row, *m)));
            line
        })
        .collect();

    layout(headers, body, &report.title)
}

pub fn render_sensitivity(summary: &[CategorySensitivity]) -> String {
    let headers = ["category", "points", "avg_unit_price", "avg_quantity"]
        .iter()
        .map(|h| h.to_string())
        .collect();
    let body = summary
        .iter()
        .map(|s| {
            vec![
                s.category.clone().unwrap_or_else(|| NONE_LABEL.to_string()),
                s.points.to_string(),
                format!("{:.2}", s.avg_unit_price),
                format!("{:.2}", s.avg_quantity),
            ]
        })
        .collect();

    layout(headers, body, "Price vs Quantity Sold")
}
