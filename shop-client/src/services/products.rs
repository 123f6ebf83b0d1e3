//! Product API

use shared::Page;
use shared::dto::{ListEnvelope, ProductDto, ProductPayload, StockDecrement, StockFlag, StockLevel};
use shared::models::{Product, ProductQuery};
use shared::validation::{
    MAX_NOTE_LEN, MAX_URL_LEN, MAX_NAME_LEN, ValidationError, validate_optional_text,
    validate_required_text,
};

use super::into_page;
use crate::{ApiClient, ClientResult, mapper};

pub struct ProductService<'a> {
    api: &'a ApiClient,
}

pub(crate) fn validate_payload(payload: &ProductPayload) -> Result<(), ValidationError> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.image, "image", MAX_URL_LEN)?;
    if payload.price.is_sign_negative() {
        return Err(ValidationError::invalid("price", "must not be negative"));
    }
    if payload.stock < 0 {
        return Err(ValidationError::invalid("stock", "must not be negative"));
    }
    Ok(())
}

impl<'a> ProductService<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, query: &ProductQuery) -> ClientResult<Page<Product>> {
        let envelope: ListEnvelope<ProductDto> =
            self.api.get("/api/products", query.to_pairs()).await?;
        Ok(into_page(envelope, query.page.unwrap_or(1), mapper::product))
    }

    pub async fn get(&self, id: i64) -> ClientResult<Product> {
        let dto: ProductDto = self.api.get(&format!("/api/products/{id}"), Vec::new()).await?;
        Ok(mapper::product(dto))
    }

    pub async fn create(&self, payload: &ProductPayload) -> ClientResult<Product> {
        validate_payload(payload)?;
        let dto: ProductDto = self.api.post("/api/products", payload).await?;
        tracing::info!(product_id = dto.id, "product created");
        Ok(mapper::product(dto))
    }

    pub async fn update(&self, id: i64, payload: &ProductPayload) -> ClientResult<Product> {
        validate_payload(payload)?;
        let dto: ProductDto = self.api.put(&format!("/api/products/{id}"), payload).await?;
        Ok(mapper::product(dto))
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.api.delete(&format!("/api/products/{id}")).await?;
        tracing::info!(product_id = id, "product deleted");
        Ok(())
    }

    /// Inventory endpoint: subtract sold units, returns remaining stock
    pub async fn decrement_stock(&self, id: i64, quantity: u32) -> ClientResult<i64> {
        let level: StockLevel = self
            .api
            .post(
                &format!("/api/products/{id}/decrement-stock"),
                &StockDecrement { quantity },
            )
            .await?;
        Ok(level.stock)
    }

    pub async fn mark_out_of_stock(&self, id: i64) -> ClientResult<()> {
        let _: serde_json::Value = self
            .api
            .patch(
                &format!("/api/products/{id}"),
                &StockFlag { out_of_stock: true },
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;
    use http::Method;
    use rust_decimal::Decimal;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_list_maps_paged_envelope() {
        let mock = Arc::new(MockTransport::new());
        mock.reply(
            Method::GET,
            "/api/products",
            json!({
                "data": [{"id": 1, "name": "Cáp", "price": 50000}],
                "total": 21,
                "page": 2,
                "limit": 10
            }),
        );
        let api = ApiClient::new(mock.clone());

        let query = ProductQuery {
            search: Some("cáp".into()),
            page: Some(2),
            ..Default::default()
        };
        let page = api.products().list(&query).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.pagination.total_pages, 3);

        let call = &mock.calls()[0];
        assert!(call.query.contains(&("search".to_string(), "cáp".to_string())));
    }

    #[tokio::test]
    async fn test_create_rejects_negative_price_without_calling() {
        let mock = Arc::new(MockTransport::new());
        let api = ApiClient::new(mock.clone());
        let payload = ProductPayload {
            name: "Pin".into(),
            description: None,
            price: Decimal::from(-1),
            stock: 1,
            image: None,
            images: Vec::new(),
            category_id: None,
        };
        assert!(api.products().create(&payload).await.is_err());
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_decrement_stock() {
        let mock = Arc::new(MockTransport::new());
        mock.reply(Method::POST, "/api/products/4/decrement-stock", json!({"stock": 2}));
        let api = ApiClient::new(mock.clone());

        assert_eq!(api.products().decrement_stock(4, 3).await.unwrap(), 2);
        let call = &mock.calls()[0];
        assert_eq!(call.body, crate::RequestBody::Json(json!({"quantity": 3})));
    }
}
