// src/models/channel.rs
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Channel {
    pub channel_id: i64,
    pub channel_name: Option<String>,
}
