// src/models/sale.rs
use sqlx::FromRow;

/// One sold line item. Foreign keys and measures are all nullable.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct SalesFact {
    pub product_id: Option<i64>,
    pub channel_id: Option<i64>,
    pub campaign_id: Option<i64>,
    pub quantity: Option<i64>,
    pub item_total: Option<f64>,
}
