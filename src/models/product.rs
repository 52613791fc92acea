// src/models/product.rs
use sqlx::FromRow;

/// Only the key is guaranteed; every attribute may be NULL in storage.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Product {
    pub product_id: i64,
    pub product_name: Option<String>,
    pub category: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub unit_price: Option<f64>,
    pub cost_price: Option<f64>,
}
