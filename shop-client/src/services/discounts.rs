//! Discount campaign API

use shared::dto::{DiscountDto, DiscountPayload, ListEnvelope};
use shared::models::{Discount, DiscountScope};
use shared::validation::{MAX_NAME_LEN, ValidationError, validate_required_text, validate_sale_off};

use crate::mapper::time::{DayBound, parse_datetime_bound};
use crate::{ApiClient, ClientResult, mapper};

pub struct DiscountService<'a> {
    api: &'a ApiClient,
}

fn validate_payload(payload: &DiscountPayload) -> Result<(), ValidationError> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_sale_off(payload.sale_off)?;
    let start = parse_datetime_bound(&payload.start_date, DayBound::Start)
        .ok_or_else(|| ValidationError::invalid("start_date", "unrecognised date"))?;
    let end = parse_datetime_bound(&payload.end_date, DayBound::End)
        .ok_or_else(|| ValidationError::invalid("end_date", "unrecognised date"))?;
    if end < start {
        return Err(ValidationError::invalid("end_date", "before start_date"));
    }
    Ok(())
}

impl<'a> DiscountService<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    async fn fetch(&self, query: Vec<(String, String)>) -> ClientResult<Vec<Discount>> {
        let envelope: ListEnvelope<DiscountDto> = self.api.get("/api/discounts", query).await?;
        // one malformed campaign should not hide the others
        Ok(envelope
            .into_items()
            .into_iter()
            .filter_map(|dto| {
                let id = dto.id;
                mapper::discount(dto)
                    .inspect_err(|e| tracing::warn!(discount_id = id, error = %e, "skipping discount"))
                    .ok()
            })
            .collect())
    }

    pub async fn list(&self) -> ClientResult<Vec<Discount>> {
        self.fetch(Vec::new()).await
    }

    /// Campaigns whose scope matches exactly (no category/global fallback)
    pub async fn for_scope(&self, scope: DiscountScope) -> ClientResult<Vec<Discount>> {
        let query = match scope {
            DiscountScope::Product(id) => vec![("product_id".to_string(), id.to_string())],
            DiscountScope::Service(id) => vec![("service_id".to_string(), id.to_string())],
            DiscountScope::Category(id) => vec![("category_id".to_string(), id.to_string())],
            DiscountScope::Global => vec![("type".to_string(), "all".to_string())],
        };
        let mut discounts = self.fetch(query).await?;
        discounts.retain(|d| d.scope == scope);
        Ok(discounts)
    }

    pub async fn for_product(&self, product_id: i64) -> ClientResult<Vec<Discount>> {
        self.for_scope(DiscountScope::Product(product_id)).await
    }

    pub async fn for_service(&self, service_id: i64) -> ClientResult<Vec<Discount>> {
        self.for_scope(DiscountScope::Service(service_id)).await
    }

    pub async fn for_category(&self, category_id: i64) -> ClientResult<Vec<Discount>> {
        self.for_scope(DiscountScope::Category(category_id)).await
    }

    pub async fn create(&self, payload: &DiscountPayload) -> ClientResult<Discount> {
        validate_payload(payload)?;
        let dto: DiscountDto = self.api.post("/api/discounts", payload).await?;
        tracing::info!(discount_id = dto.id, sale_off = payload.sale_off, "discount created");
        mapper::discount(dto)
    }

    pub async fn update(&self, id: i64, payload: &DiscountPayload) -> ClientResult<Discount> {
        validate_payload(payload)?;
        let dto: DiscountDto = self.api.put(&format!("/api/discounts/{id}"), payload).await?;
        mapper::discount(dto)
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.api.delete(&format!("/api/discounts/{id}")).await
    }
}
