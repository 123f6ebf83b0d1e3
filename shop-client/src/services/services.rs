//! Repair service catalog API

use shared::dto::{ListEnvelope, ServiceDto, ServicePayload};
use shared::models::Service;
use shared::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text};

use crate::{ApiClient, ClientResult, mapper};

/// Named `ServiceCatalog` to keep it apart from the `Service` model
pub struct ServiceCatalog<'a> {
    api: &'a ApiClient,
}

impl<'a> ServiceCatalog<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, category_id: Option<i64>) -> ClientResult<Vec<Service>> {
        let query = category_id
            .map(|id| vec![("category_id".to_string(), id.to_string())])
            .unwrap_or_default();
        let envelope: ListEnvelope<ServiceDto> = self.api.get("/api/services", query).await?;
        Ok(envelope.into_items().into_iter().map(mapper::service).collect())
    }

    pub async fn get(&self, id: i64) -> ClientResult<Service> {
        let dto: ServiceDto = self.api.get(&format!("/api/services/{id}"), Vec::new()).await?;
        Ok(mapper::service(dto))
    }

    pub async fn create(&self, payload: &ServicePayload) -> ClientResult<Service> {
        validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
        validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
        let dto: ServiceDto = self.api.post("/api/services", payload).await?;
        tracing::info!(service_id = dto.id, "service created");
        Ok(mapper::service(dto))
    }

    pub async fn update(&self, id: i64, payload: &ServicePayload) -> ClientResult<Service> {
        validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
        validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
        let dto: ServiceDto = self.api.put(&format!("/api/services/{id}"), payload).await?;
        Ok(mapper::service(dto))
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.api.delete(&format!("/api/services/{id}")).await
    }
}
