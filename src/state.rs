// src/state.rs
use std::sync::Arc;

use crate::dtos::report::AnalyticsSnapshot;

#[derive(Clone)]
pub struct AppState {
    pub snapshot: Arc<AnalyticsSnapshot>,
}

impl AppState {
    pub fn new(snapshot: AnalyticsSnapshot) -> Self {
        Self { snapshot: Arc::new(snapshot) }
    }
}
