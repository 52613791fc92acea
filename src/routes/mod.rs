// src/routes/mod.rs
pub mod reports;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(reports::routes())
        .route("/", get(|| async { "Sales Analytics" }))
        .route("/health", get(health_check));

    Router::new()
        .nest("/analytics", api)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::database::SourceTables;
    use crate::models::{Channel, Product, SalesFact};
    use crate::services::pipeline;

    fn app() -> Router {
        let source = SourceTables {
            products: vec![Product {
                product_id: 1,
                product_name: Some("Linen Shirt".into()),
                category: Some("Tops".into()),
                size: Some("L".into()),
                color: Some("White".into()),
                unit_price: Some(45.0),
                cost_price: Some(20.0),
            }],
            sales: vec![SalesFact {
                product_id: Some(1),
                channel_id: Some(3),
                campaign_id: None,
                quantity: Some(3),
                item_total: Some(135.0),
            }],
            channels: vec![Channel { channel_id: 3, channel_name: Some("Marketplace".into()) }],
            campaigns: vec![],
        };
        let snapshot = pipeline::run(&source, 10).unwrap();
        create_router(AppState::new(snapshot))
    }

    async fn get_json(path: &str) -> (StatusCode, Value) {
        let resp = app()
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health() {
        let resp = app()
            .oneshot(Request::builder().uri("/analytics/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn full_snapshot() {
        let (status, body) = get_json("/analytics/reports").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sales_rows"], 1);
        assert_eq!(body["reports"].as_array().unwrap().len(), 8);
    }

    #[tokio::test]
    async fn single_report() {
        let (status, body) = get_json("/analytics/reports/channel_performance").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["group_by"], "channel_name");
        assert_eq!(body["rows"][0]["group"], "Marketplace");
        assert_eq!(body["rows"][0]["total_revenue"], 135.0);
        assert_eq!(body["rows"][0]["avg_order_value"], 135.0);
    }

    #[tokio::test]
    async fn campaign_group_is_null_when_missing() {
        let (_, body) = get_json("/analytics/reports/campaign_performance").await;
        assert!(body["rows"][0]["group"].is_null());
    }

    #[tokio::test]
    async fn unknown_report_is_404() {
        let (status, body) = get_json("/analytics/reports/brand_performance").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Report 'brand_performance' not found");
    }

    #[tokio::test]
    async fn price_sensitivity_points() {
        let (status, body) = get_json("/analytics/price-sensitivity").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["points"][0]["unit_price"], 45.0);
        assert_eq!(body["by_category"][0]["category"], "Tops");
    }
}
