//! Catalog listings with resolved prices

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::Page;
use shared::models::{Discount, DiscountScope, Product, ProductQuery, Service};
use shop_client::ApiClient;

use crate::error::AppResult;
use crate::pricing::{PriceDisplay, product_price, service_price};
use crate::utils::{Debouncer, LatestFetch};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCard {
    pub product: Product,
    pub price: PriceDisplay,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceCard {
    pub service: Service,
    pub price: PriceDisplay,
}

/// All campaigns; the listing still renders with embedded discounts if this fails
async fn campaigns(api: &ApiClient) -> Vec<Discount> {
    match api.discounts().list().await {
        Ok(list) => list,
        Err(e) => {
            tracing::warn!(error = %e, "discount list unavailable");
            Vec::new()
        }
    }
}

/// Campaigns for one product or service; on failure the item shows its base price
pub async fn scoped_campaigns(api: &ApiClient, scope: DiscountScope) -> Vec<Discount> {
    match api.discounts().for_scope(scope).await {
        Ok(list) => list,
        Err(e) => {
            tracing::warn!(scope = ?scope, error = %e, "scoped discounts unavailable");
            Vec::new()
        }
    }
}

pub async fn browse_products(
    api: &ApiClient,
    query: &ProductQuery,
    now: DateTime<Utc>,
) -> AppResult<Page<ProductCard>> {
    let page = api.products().list(query).await?;
    let discounts = campaigns(api).await;
    Ok(page.map(|product| ProductCard {
        price: product_price(&product, &discounts, now),
        product,
    }))
}

pub async fn browse_services(
    api: &ApiClient,
    category_id: Option<i64>,
    now: DateTime<Utc>,
) -> AppResult<Vec<ServiceCard>> {
    let services = api.services().list(category_id).await?;
    let discounts = campaigns(api).await;
    Ok(services
        .into_iter()
        .map(|service| ServiceCard {
            price: service_price(&service, &discounts, now),
            service,
        })
        .collect())
}

/// Search-as-you-type step: `None` when a newer keystroke or fetch superseded this one
pub async fn search_products(
    api: &ApiClient,
    debouncer: &Debouncer,
    latest: &LatestFetch,
    query: ProductQuery,
    now: DateTime<Utc>,
) -> AppResult<Option<Page<ProductCard>>> {
    let Some(query) = debouncer.settle(query).await else {
        return Ok(None);
    };
    let ticket = latest.begin();
    let page = browse_products(api, &query, now).await?;
    Ok(latest.accept(ticket, page))
}
