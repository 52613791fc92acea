// src/services/join.rs
use std::collections::HashMap;

use crate::error::AppError;
use crate::models::{Campaign, Channel, Product, SalesFact};

/// A fact row widened with every dimension attribute. Attributes are `None`
/// when the referenced dimension row does not exist or stores NULL.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedSalesRecord {
    pub product_id: Option<i64>,
    pub channel_id: Option<i64>,
    pub campaign_id: Option<i64>,
    pub quantity: Option<i64>,
    pub item_total: Option<f64>,

    pub product_name: Option<String>,
    pub category: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub unit_price: Option<f64>,
    pub cost_price: Option<f64>,

    pub channel_name: Option<String>,
    pub campaign_name: Option<String>,
}

fn index_by_key<'a, T>(
    rows: &'a [T],
    dimension: &str,
    key: impl Fn(&T) -> i64,
) -> Result<HashMap<i64, &'a T>, AppError> {
    let mut index = HashMap::with_capacity(rows.len());
    for row in rows {
        let id = key(row);
        if index.insert(id, row).is_some() {
            return Err(AppError::validation(format!(
                "{dimension} key {id} is not unique"
            )));
        }
    }
    Ok(index)
}

/// Left-join facts onto products, channels, then campaigns.
///
/// Output keeps the input order and has exactly one record per fact row.
pub fn left_join(
    sales: &[SalesFact],
    products: &[Product],
    channels: &[Channel],
    campaigns: &[Campaign],
) -> Result<Vec<JoinedSalesRecord>, AppError> {
    let products = index_by_key(products, "product", |p| p.product_id)?;
    let channels = index_by_key(channels, "channel", |c| c.channel_id)?;
    let campaigns = index_by_key(campaigns, "campaign", |c| c.campaign_id)?;

    let joined = sales
        .iter()
        .map(|fact| {
            let product = fact.product_id.and_then(|id| products.get(&id).copied());
            let channel = fact.channel_id.and_then(|id| channels.get(&id).copied());
            let campaign = fact.campaign_id.and_then(|id| campaigns.get(&id).copied());

            JoinedSalesRecord {
                product_id: fact.product_id,
                channel_id: fact.channel_id,
                campaign_id: fact.campaign_id,
                quantity: fact.quantity,
                item_total: fact.item_total,
                product_name: product.and_then(|p| p.product_name.clone()),
                category: product.and_then(|p| p.category.clone()),
                size: product.and_then(|p| p.size.clone()),
                color: product.and_then(|p| p.color.clone()),
                unit_price: product.and_then(|p| p.unit_price),
                cost_price: product.and_then(|p| p.cost_price),
                channel_name: channel.and_then(|c| c.channel_name.clone()),
                campaign_name: campaign.and_then(|c| c.campaign_name.clone()),
            }
        })
        .collect();

    Ok(joined)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str) -> Product {
        Product {
            product_id: id,
            product_name: Some(name.to_string()),
            category: Some("Shoes".to_string()),
            size: Some("M".to_string()),
            color: None,
            unit_price: Some(60.0),
            cost_price: Some(40.0),
        }
    }

    fn fact(product_id: Option<i64>, channel_id: Option<i64>, campaign_id: Option<i64>) -> SalesFact {
        SalesFact { product_id, channel_id, campaign_id, quantity: Some(1), item_total: Some(25.0) }
    }

    #[test]
    fn preserves_cardinality_and_order() {
        let products = vec![product(1, "Runner"), product(2, "Loafer")];
        let channels = vec![Channel { channel_id: 1, channel_name: Some("Online".into()) }];
        let campaigns = vec![Campaign { campaign_id: 7, campaign_name: Some("Spring".into()) }];
        let sales = vec![
            fact(Some(2), Some(1), Some(7)),
            fact(Some(1), Some(1), None),
            fact(Some(2), Some(9), Some(7)),
            fact(None, None, None),
        ];

        let joined = left_join(&sales, &products, &channels, &campaigns).unwrap();
        assert_eq!(joined.len(), sales.len());
        assert_eq!(joined[0].product_name.as_deref(), Some("Loafer"));
        assert_eq!(joined[0].campaign_name.as_deref(), Some("Spring"));
        assert_eq!(joined[1].product_name.as_deref(), Some("Runner"));
        assert_eq!(joined[1].campaign_name, None);
    }

    #[test]
    fn unmatched_keys_leave_attributes_absent() {
        let products = vec![product(1, "Runner")];
        let sales = vec![fact(Some(42), Some(3), Some(5))];

        let joined = left_join(&sales, &products, &[], &[]).unwrap();
        let row = &joined[0];
        assert_eq!(row.product_id, Some(42));
        assert_eq!(row.product_name, None);
        assert_eq!(row.unit_price, None);
        assert_eq!(row.channel_name, None);
        assert_eq!(row.campaign_name, None);
        assert_eq!(row.item_total, Some(25.0));
    }

    #[test]
    fn null_attributes_on_matched_rows_stay_absent() {
        let mut nameless = product(1, "Runner");
        nameless.product_name = None;
        nameless.unit_price = None;
        let channels = vec![Channel { channel_id: 1, channel_name: None }];
        let campaigns = vec![Campaign { campaign_id: 2, campaign_name: None }];
        let sales = vec![SalesFact {
            product_id: Some(1),
            channel_id: Some(1),
            campaign_id: Some(2),
            quantity: None,
            item_total: Some(12.5),
        }];

        let joined = left_join(&sales, &[nameless], &channels, &campaigns).unwrap();
        assert_eq!(joined.len(), 1);
        let row = &joined[0];
        assert_eq!(row.product_name, None);
        assert_eq!(row.unit_price, None);
        assert_eq!(row.cost_price, Some(40.0));
        assert_eq!(row.category.as_deref(), Some("Shoes"));
        assert_eq!(row.channel_name, None);
        assert_eq!(row.campaign_name, None);
        assert_eq!(row.quantity, None);
    }

    #[test]
    fn duplicate_dimension_key_is_rejected() {
        let products = vec![product(1, "Runner"), product(1, "Runner v2")];
        let err = left_join(&[fact(Some(1), None, None)], &products, &[], &[]).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("product key 1")));
    }
}
