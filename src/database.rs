// src/database.rs
use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{info, instrument};

use crate::config::{validate_identifier, TableNames};
use crate::error::AppError;
use crate::models::{Campaign, Channel, Product, SalesFact};

/// The four raw datasets, exactly as read from storage.
#[derive(Debug)]
pub struct SourceTables {
    pub products: Vec<Product>,
    pub sales: Vec<SalesFact>,
    pub channels: Vec<Channel>,
    pub campaigns: Vec<Campaign>,
}

pub async fn create_pool(database_url: &str) -> Result<PgPool, AppError> {
    PgPoolOptions::new()
        .max_connections(4)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url)
        .await
        .map_err(AppError::Connection)
}

pub fn products_query(table: &str) -> String {
    format!(
        "SELECT product_id::INT8      AS product_id,
                product_name,
                category,
                size,
                color,
                unit_price::FLOAT8    AS unit_price,
                cost_price::FLOAT8    AS cost_price
         FROM {table}"
    )
}

pub fn sales_query(table: &str) -> String {
    format!(
        "SELECT product_id::INT8      AS product_id,
                channel_id::INT8      AS channel_id,
                campaign_id::INT8     AS campaign_id,
                quantity::INT8        AS quantity,
                item_total::FLOAT8    AS item_total
         FROM {table}"
    )
}

pub fn channels_query(table: &str) -> String {
    format!("SELECT channel_id::INT8 AS channel_id, channel_name FROM {table}")
}

pub fn campaigns_query(table: &str) -> String {
    format!("SELECT campaign_id::INT8 AS campaign_id, campaign_name FROM {table}")
}

async fn fetch_table<T>(pool: &PgPool, table: &str, sql: String) -> Result<Vec<T>, AppError>
where
    T: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
{
    validate_identifier(table).map_err(AppError::config)?;
    let rows = sqlx::query_as::<_, T>(&sql)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::from_load(table, e))?;
    info!(table, rows = rows.len(), "Loaded table");
    Ok(rows)
}

#[instrument(skip(pool))]
pub async fn load_tables(pool: &PgPool, tables: &TableNames) -> Result<SourceTables, AppError> {
    let products: Vec<Product> =
        fetch_table(pool, &tables.products, products_query(&tables.products)).await?;
    let sales: Vec<SalesFact> =
        fetch_table(pool, &tables.sales, sales_query(&tables.sales)).await?;
    let channels: Vec<Channel> =
        fetch_table(pool, &tables.channels, channels_query(&tables.channels)).await?;
    let campaigns: Vec<Campaign> =
        fetch_table(pool, &tables.campaigns, campaigns_query(&tables.campaigns)).await?;

    check_quantities(&sales)?;

    Ok(SourceTables { products, sales, channels, campaigns })
}

fn check_quantities(sales: &[SalesFact]) -> Result<(), AppError> {
    let negative = sales
        .iter()
        .enumerate()
        .find_map(|(idx, s)| s.quantity.filter(|q| *q < 0).map(|q| (idx, q)));
    match negative {
        Some((idx, quantity)) => Err(AppError::validation(format!(
            "sales row {idx} has negative quantity {quantity}"
        ))),
        None => Ok(()),
    }
}
