//! Category API

use shared::dto::{CategoryDto, CategoryPayload, ListEnvelope};
use shared::models::{Category, CategoryKind};
use shared::validation::{MAX_NAME_LEN, validate_required_text};

use crate::{ApiClient, ClientResult, mapper};

pub struct CategoryService<'a> {
    api: &'a ApiClient,
}

impl<'a> CategoryService<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// All categories, or only those of `kind`
    pub async fn list(&self, kind: Option<CategoryKind>) -> ClientResult<Vec<Category>> {
        let query = kind
            .map(|k| vec![("type".to_string(), k.as_str().to_string())])
            .unwrap_or_default();
        let envelope: ListEnvelope<CategoryDto> = self.api.get("/api/categories", query).await?;
        let mut categories: Vec<Category> =
            envelope.into_items().into_iter().map(mapper::category).collect();
        // older backends ignore the filter
        if let Some(kind) = kind {
            categories.retain(|c| c.kind == kind);
        }
        Ok(categories)
    }

    pub async fn create(
        &self,
        name: &str,
        description: Option<String>,
        kind: CategoryKind,
    ) -> ClientResult<Category> {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
        let payload = CategoryPayload {
            name: name.trim().to_string(),
            description,
            kind: kind.as_str().to_string(),
        };
        let dto: CategoryDto = self.api.post("/api/categories", &payload).await?;
        Ok(mapper::category(dto))
    }

    pub async fn update(&self, id: i64, payload: &CategoryPayload) -> ClientResult<Category> {
        validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
        let dto: CategoryDto = self.api.put(&format!("/api/categories/{id}"), payload).await?;
        Ok(mapper::category(dto))
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.api.delete(&format!("/api/categories/{id}")).await
    }
}
