//! Review listings with their average

use serde::Serialize;
use shared::models::{Review, average_rating};
use shop_client::ApiClient;

use crate::error::AppResult;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewSummary {
    pub reviews: Vec<Review>,
    pub average: Option<f64>,
}

impl ReviewSummary {
    pub fn new(mut reviews: Vec<Review>) -> Self {
        // newest first, undated last
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let average = average_rating(&reviews);
        Self { reviews, average }
    }
}

pub async fn product_reviews(api: &ApiClient, product_id: i64) -> AppResult<ReviewSummary> {
    Ok(ReviewSummary::new(api.reviews().list_for_product(product_id).await?))
}

pub async fn service_reviews(api: &ApiClient, service_id: i64) -> AppResult<ReviewSummary> {
    Ok(ReviewSummary::new(api.reviews().list_for_service(service_id).await?))
}
