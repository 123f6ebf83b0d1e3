//! Review API

use shared::dto::{ListEnvelope, ReviewDto, ReviewPayload};
use shared::models::{Review, ReviewTarget};
use shared::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_rating, validate_required_text};

use crate::{ApiClient, ClientResult, mapper};

pub struct ReviewService<'a> {
    api: &'a ApiClient,
}

impl<'a> ReviewService<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    async fn list(&self, key: &str, id: i64) -> ClientResult<Vec<Review>> {
        let envelope: ListEnvelope<ReviewDto> = self
            .api
            .get("/api/reviews", vec![(key.to_string(), id.to_string())])
            .await?;
        Ok(envelope
            .into_items()
            .into_iter()
            .filter_map(|dto| mapper::review(dto).ok())
            .collect())
    }

    pub async fn list_for_product(&self, product_id: i64) -> ClientResult<Vec<Review>> {
        let mut reviews = self.list("product_id", product_id).await?;
        reviews.retain(|r| r.target == ReviewTarget::Product(product_id));
        Ok(reviews)
    }

    pub async fn list_for_service(&self, service_id: i64) -> ClientResult<Vec<Review>> {
        let mut reviews = self.list("service_id", service_id).await?;
        reviews.retain(|r| r.target == ReviewTarget::Service(service_id));
        Ok(reviews)
    }

    pub async fn submit(
        &self,
        target: ReviewTarget,
        author: &str,
        rating: u8,
        comment: Option<String>,
    ) -> ClientResult<Review> {
        validate_required_text(author, "name", MAX_NAME_LEN)?;
        validate_rating(rating)?;
        validate_optional_text(&comment, "comment", MAX_NOTE_LEN)?;

        let (product_id, service_id) = match target {
            ReviewTarget::Product(id) => (Some(id), None),
            ReviewTarget::Service(id) => (None, Some(id)),
        };
        let payload = ReviewPayload {
            product_id,
            service_id,
            name: author.trim().to_string(),
            rating,
            comment,
        };
        let dto: ReviewDto = self.api.post("/api/reviews", &payload).await?;
        mapper::review(dto)
    }
}
