// src/models/campaign.rs
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Campaign {
    pub campaign_id: i64,
    pub campaign_name: Option<String>,
}
