//! Per-resource services
//!
//! Each service borrows the [`crate::ApiClient`], calls one REST resource
//! and returns view models.

mod auth;
mod cart;
mod categories;
mod content;
mod discounts;
mod mail;
mod products;
mod requests;
mod reviews;
mod services;
mod stats;
mod upload;

pub use auth::AuthService;
pub use cart::CartService;
pub use categories::CategoryService;
pub use content::ContentService;
pub use discounts::DiscountService;
pub use mail::MailService;
pub use products::ProductService;
pub use requests::RequestService;
pub use reviews::ReviewService;
pub use services::ServiceCatalog;
pub use stats::StatsService;
pub use upload::UploadService;

use shared::Page;
use shared::dto::ListEnvelope;

/// Turn a list envelope into a mapped page
pub(crate) fn into_page<D, T>(
    envelope: ListEnvelope<D>,
    fallback_page: u32,
    map: impl FnMut(D) -> T,
) -> Page<T> {
    match envelope {
        ListEnvelope::Paged {
            data,
            total,
            page,
            limit,
        } => {
            let count = data.len();
            let items: Vec<T> = data.into_iter().map(map).collect();
            let per_page = limit.unwrap_or(count.max(1) as u32);
            Page::new(
                items,
                page.unwrap_or(fallback_page),
                per_page,
                total.unwrap_or(count as u64),
            )
        }
        ListEnvelope::Plain(data) => Page::single(data.into_iter().map(map).collect()),
    }
}
